//! Precedence-aware formula templates
//!
//! A [`Formula`] records the chain of operations applied to a dataset as a
//! template in which the dataset's label is a placeholder. The label is only
//! substituted when the formula is rendered, so renaming a dataset after a
//! chain of transforms renames it inside the formula as well.
//!
//! Every formula remembers the [`Priority`] of its most recent operation.
//! Parentheses around an operand are dropped whenever that priority shows
//! they are redundant.

use std::fmt;

/// Precedence class of an operation; lower binds tighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u8);

impl Priority {
    /// Bare labels and function calls such as `log(x1)`
    pub const LABEL: Priority = Priority(0);
    pub const POW: Priority = Priority(10);
    /// Division is not associative, so it sits just below multiplication
    pub const DIV: Priority = Priority(19);
    pub const MUL: Priority = Priority(20);
    /// Subtraction is not associative, so it sits just below addition
    pub const SUB: Priority = Priority(29);
    pub const ADD: Priority = Priority(30);
    pub const NEG: Priority = Priority(40);

    /// Threshold for the operand of a negation
    const NEG_OPERAND: Priority = Priority(28);

    pub fn new(value: u8) -> Self {
        Priority(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    fn up(self) -> Self {
        Priority(self.0.saturating_add(1))
    }

    fn down(self) -> Self {
        Priority(self.0.saturating_sub(1))
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::LABEL
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Binary arithmetic supported between datasets and scalars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 5] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Pow,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
        }
    }

    pub fn priority(self) -> Priority {
        match self {
            BinaryOp::Add => Priority::ADD,
            BinaryOp::Sub => Priority::SUB,
            BinaryOp::Mul => Priority::MUL,
            BinaryOp::Div => Priority::DIV,
            BinaryOp::Pow => Priority::POW,
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Render a scalar operand; negative values are parenthesised
pub fn scalar_text(value: f64) -> String {
    if value.is_sign_negative() && value != 0.0 {
        format!("({value})")
    } else {
        format!("{value}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Text(String),
    Label,
}

/// Template of the operations applied to a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    tokens: Vec<Token>,
    priority: Priority,
}

impl Default for Formula {
    fn default() -> Self {
        Self {
            tokens: vec![Token::Label],
            priority: Priority::LABEL,
        }
    }
}

impl Formula {
    /// The formula of an untransformed dataset: its bare label
    pub fn new() -> Self {
        Self::default()
    }

    /// Priority of the most recent operation
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Whether no operation has been recorded
    pub fn is_identity(&self) -> bool {
        self.tokens == [Token::Label]
    }

    /// Substitute `label` into the template
    pub fn render(&self, label: &str) -> String {
        render(&self.tokens, label)
    }

    /// The rendered formula without its outermost parentheses
    pub fn fmt(&self, label: &str) -> String {
        render(&strip(&self.tokens), label)
    }

    /// The rendered formula as the right operand of an operation of priority `p`
    pub fn formatted(&self, label: &str, p: Priority) -> String {
        render(&self.auto_strip(self.operand_threshold(p)), label)
    }

    /// Negation: `(-F)`
    pub fn negate(&self) -> Formula {
        let mut tokens = vec![Token::Text("(-".to_string())];
        tokens.extend(self.auto_strip(Priority::NEG_OPERAND));
        tokens.push(Token::Text(")".to_string()));
        Formula::compose(tokens, Priority::NEG)
    }

    /// `(F op rhs)`, where `rhs` is already rendered
    pub fn binary(&self, op: BinaryOp, rhs: &str) -> Formula {
        let p = op.priority();
        // Power is right-associative, a power on the left stays wrapped: `(a**2)**3`
        let threshold = if op == BinaryOp::Pow { p.down() } else { p.up() };
        let mut tokens = vec![Token::Text("(".to_string())];
        tokens.extend(self.auto_strip(threshold));
        tokens.push(Token::Text(format!("{op}{rhs})")));
        Formula::compose(tokens, p)
    }

    /// `(lhs op F)`, where `lhs` is already rendered
    pub fn reversed(&self, op: BinaryOp, lhs: &str) -> Formula {
        let p = op.priority();
        let mut tokens = vec![Token::Text(format!("({lhs}{op}"))];
        tokens.extend(self.auto_strip(self.operand_threshold(p)));
        tokens.push(Token::Text(")".to_string()));
        Formula::compose(tokens, p)
    }

    /// Function call `name(F)` or `name(F, arg)`
    pub fn call(&self, name: &str, arg: Option<&str>) -> Formula {
        let mut tokens = vec![Token::Text(format!("{name}("))];
        tokens.extend(strip(&self.tokens));
        let close = match arg {
            Some(arg) => format!(", {arg})"),
            None => ")".to_string(),
        };
        tokens.push(Token::Text(close));
        Formula::compose(tokens, Priority::LABEL)
    }

    /// `(F-mean(F))`
    pub fn demean(&self) -> Formula {
        let inner = strip(&self.tokens);
        let mut tokens = vec![Token::Text("(".to_string())];
        tokens.extend(inner.iter().cloned());
        tokens.push(Token::Text("-mean(".to_string()));
        tokens.extend(inner);
        tokens.push(Token::Text("))".to_string()));
        Formula::compose(tokens, Priority::SUB)
    }

    /// `((F-mean(F))/std(F))`
    pub fn zscore(&self) -> Formula {
        let inner = strip(&self.tokens);
        let mut tokens = vec![Token::Text("((".to_string())];
        tokens.extend(inner.iter().cloned());
        tokens.push(Token::Text("-mean(".to_string()));
        tokens.extend(inner.iter().cloned());
        tokens.push(Token::Text("))/std(".to_string()));
        tokens.extend(inner);
        tokens.push(Token::Text("))".to_string()));
        Formula::compose(tokens, Priority::DIV)
    }

    fn compose(tokens: Vec<Token>, priority: Priority) -> Formula {
        let mut merged: Vec<Token> = Vec::with_capacity(tokens.len());
        for token in tokens {
            if let Token::Text(text) = &token {
                if text.is_empty() {
                    continue;
                }
                if let Some(Token::Text(prev)) = merged.last_mut() {
                    prev.push_str(text);
                    continue;
                }
            }
            merged.push(token);
        }
        Formula {
            tokens: merged,
            priority,
        }
    }

    /// Right operand of `-` or `/` keeps its parentheses at equal priority, as in `2-(x-y)`
    fn operand_threshold(&self, p: Priority) -> Priority {
        if p == self.priority && (p == Priority::DIV || p == Priority::SUB) {
            p.down()
        } else {
            p
        }
    }

    fn auto_strip(&self, p: Priority) -> Vec<Token> {
        if p == Priority::LABEL || self.priority <= p {
            strip(&self.tokens)
        } else {
            self.tokens.clone()
        }
    }
}

fn render(tokens: &[Token], label: &str) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Token::Text(text) => text.as_str(),
            Token::Label => label,
        })
        .collect()
}

/// Remove one pair of parentheses enclosing the whole template
fn strip(tokens: &[Token]) -> Vec<Token> {
    let opens = matches!(tokens.first(), Some(Token::Text(t)) if t.starts_with('('));
    let closes = matches!(tokens.last(), Some(Token::Text(t)) if t.ends_with(')'));
    if !(opens && closes) {
        return tokens.to_vec();
    }
    if let [Token::Text(only)] = tokens {
        if only.len() < 2 {
            return tokens.to_vec();
        }
        return vec![Token::Text(only[1..only.len() - 1].to_string())];
    }

    let mut out = tokens.to_vec();
    if let Some(Token::Text(first)) = out.first_mut() {
        first.remove(0);
    }
    if let Some(Token::Text(last)) = out.last_mut() {
        last.pop();
    }
    out.retain(|t| !matches!(t, Token::Text(text) if text.is_empty()));
    out
}

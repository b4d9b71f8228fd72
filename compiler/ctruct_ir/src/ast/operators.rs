//! Binary, unary and assignment operators.

/// Binary operators, grouped by precedence level.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    /// Lowest binding level in the precedence table.
    pub const MIN_PRECEDENCE: u8 = 1;

    /// Binding strength, 1 (`||`) to 10 (`* / %`). All levels are
    /// left-associative.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::BitOr => 3,
            Self::BitXor => 4,
            Self::BitAnd => 5,
            Self::Eq | Self::NotEq => 6,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 7,
            Self::Shl | Self::Shr => 8,
            Self::Add | Self::Sub => 9,
            Self::Mul | Self::Div | Self::Mod => 10,
        }
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }
}

/// Prefix unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `*x`
    Deref,
    /// `&x`
    AddrOf,
    /// `+x`
    Plus,
    /// `-x`
    Neg,
    /// `!x`
    Not,
    /// `~x`
    BitNot,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Deref => "*",
            Self::AddrOf => "&",
            Self::Plus => "+",
            Self::Neg => "-",
            Self::Not => "!",
            Self::BitNot => "~",
        }
    }
}

/// Assignment operators; `Compound(op)` is `op=`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Assign,
    Compound(BinaryOp),
}

impl AssignOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Compound(BinaryOp::Add) => "+=",
            Self::Compound(BinaryOp::Sub) => "-=",
            Self::Compound(BinaryOp::Mul) => "*=",
            Self::Compound(BinaryOp::Div) => "/=",
            Self::Compound(BinaryOp::Mod) => "%=",
            Self::Compound(BinaryOp::BitAnd) => "&=",
            Self::Compound(BinaryOp::BitOr) => "|=",
            Self::Compound(BinaryOp::BitXor) => "^=",
            Self::Compound(BinaryOp::Shl) => "<<=",
            Self::Compound(BinaryOp::Shr) => ">>=",
            Self::Compound(_) => "=",
        }
    }
}

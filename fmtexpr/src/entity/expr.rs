use log::debug;
use strum::{EnumIter, IntoEnumIterator};

use crate::{
    descriptor::Descriptor,
    entity::{Entity, Introspect, Payload, Value},
    error::{Error, Result},
    ident::Ident,
    set::{DependencySet, join, unique},
};

/// Binary operators available to expressions.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIter)]
pub enum BinaryOp {
    /// Checked integer addition
    Add,
    /// Checked integer subtraction
    Sub,
    /// Checked integer multiplication
    Mul,
    /// Checked integer division
    Div,
    /// Checked integer remainder
    Rem,
    /// Bitwise and on integers, logical and on booleans
    BitAnd,
    /// Bitwise or on integers, logical or on booleans
    BitOr,
    /// Bitwise xor on integers, logical xor on booleans
    BitXor,
    /// Checked left shift
    Shl,
    /// Checked arithmetic right shift
    Shr,
    /// Short-circuit-free logical and
    And,
    /// Short-circuit-free logical or
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Text concatenation
    Concat,
}

impl BinaryOp {
    /// Creates a [`BinaryOp`] from its string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        BinaryOp::iter().find(|op| op.to_str() == s)
    }

    /// Returns the string representation of the [`BinaryOp`].
    pub fn to_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Concat => "++",
        }
    }

    /// Returns true if the operator produces a boolean out of two comparable operands.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }

    /// Apply the operator to two resolved payloads.
    pub fn apply(&self, lhs: &Payload, rhs: &Payload) -> Result<Payload> {
        match (lhs, rhs) {
            (Payload::Integer(l), Payload::Integer(r)) => self.apply_integer(*l, *r),
            (Payload::Boolean(l), Payload::Boolean(r)) => self.apply_boolean(*l, *r),
            (Payload::Text(l), Payload::Text(r)) => match self {
                BinaryOp::Concat => Ok(Payload::Text(format!("{}{}", l, r).into())),
                op if op.is_comparison() => Ok(Payload::Boolean(self.compare(l, r))),
                _ => Err(self.mismatch(lhs, rhs)),
            },
            _ => Err(self.mismatch(lhs, rhs)),
        }
    }

    fn apply_integer(&self, l: i128, r: i128) -> Result<Payload> {
        let overflow = || Error::Overflow {
            op: *self,
            lhs: l,
            rhs: r,
        };
        let checked = |value: Option<i128>| value.map(Payload::Integer).ok_or_else(overflow);

        match self {
            BinaryOp::Add => checked(l.checked_add(r)),
            BinaryOp::Sub => checked(l.checked_sub(r)),
            BinaryOp::Mul => checked(l.checked_mul(r)),
            BinaryOp::Div | BinaryOp::Rem if r == 0 => Err(Error::DivisionByZero { op: *self }),
            BinaryOp::Div => checked(l.checked_div(r)),
            BinaryOp::Rem => checked(l.checked_rem(r)),
            BinaryOp::BitAnd => Ok(Payload::Integer(l & r)),
            BinaryOp::BitOr => Ok(Payload::Integer(l | r)),
            BinaryOp::BitXor => Ok(Payload::Integer(l ^ r)),
            BinaryOp::Shl | BinaryOp::Shr => {
                let amount = u32::try_from(r).map_err(|_| overflow())?;
                if *self == BinaryOp::Shl {
                    // Shifting back must restore `l`, otherwise bits were lost.
                    checked(l.checked_shl(amount).filter(|shifted| shifted >> amount == l))
                } else {
                    checked(l.checked_shr(amount))
                }
            }
            op if op.is_comparison() => Ok(Payload::Boolean(self.compare(&l, &r))),
            _ => Err(self.mismatch(&Payload::Integer(l), &Payload::Integer(r))),
        }
    }

    fn apply_boolean(&self, l: bool, r: bool) -> Result<Payload> {
        match self {
            BinaryOp::And | BinaryOp::BitAnd => Ok(Payload::Boolean(l && r)),
            BinaryOp::Or | BinaryOp::BitOr => Ok(Payload::Boolean(l || r)),
            BinaryOp::BitXor => Ok(Payload::Boolean(l ^ r)),
            BinaryOp::Eq => Ok(Payload::Boolean(l == r)),
            BinaryOp::Ne => Ok(Payload::Boolean(l != r)),
            _ => Err(self.mismatch(&Payload::Boolean(l), &Payload::Boolean(r))),
        }
    }

    fn compare<T: PartialOrd + ?Sized>(&self, l: &T, r: &T) -> bool {
        match self {
            BinaryOp::Eq => l == r,
            BinaryOp::Ne => l != r,
            BinaryOp::Lt => l < r,
            BinaryOp::Le => l <= r,
            BinaryOp::Gt => l > r,
            BinaryOp::Ge => l >= r,
            _ => unreachable!("`{}` is not a comparison", self.to_str()),
        }
    }

    fn mismatch(&self, lhs: &Payload, rhs: &Payload) -> Error {
        Error::OperandMismatch {
            op: *self,
            lhs: lhs.kind_str(),
            rhs: rhs.kind_str(),
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Deferred binary computation over two sub-entities.
///
/// An expression is not a stored value: [`Expression::apply`] evaluates both operands against
/// the same input and combines their payloads with the operator, eagerly and without
/// memoization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    op: BinaryOp,
    lhs: Box<Entity>,
    rhs: Box<Entity>,
    dependencies: DependencySet,
}

impl Expression {
    /// Combine `lhs` and `rhs` with `op`.
    ///
    /// Dependencies are `unique(join(refs(lhs), refs(rhs)))` where `refs` are the
    /// [reference dependencies](Introspect::reference_dependencies) of each operand.
    pub fn new(op: BinaryOp, lhs: impl Into<Entity>, rhs: impl Into<Entity>) -> Self {
        let lhs: Entity = lhs.into();
        let rhs: Entity = rhs.into();
        let dependencies = unique(join([
            lhs.reference_dependencies(),
            rhs.reference_dependencies(),
        ]));
        Self {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            dependencies,
        }
    }

    pub fn op(&self) -> BinaryOp {
        self.op
    }

    pub fn lhs(&self) -> &Entity {
        &self.lhs
    }

    pub fn rhs(&self) -> &Entity {
        &self.rhs
    }

    /// Evaluate the expression against `input`.
    ///
    /// The result is an unbound value. It keeps the operands' descriptor when both share the
    /// same one and is [`Descriptor::Unspecified`] otherwise.
    pub fn apply(&self, input: &Payload) -> Result<Value> {
        let lhs = self.lhs.apply(input)?;
        let rhs = self.rhs.apply(input)?;
        let payload = self.op.apply(lhs.payload(), rhs.payload())?;
        debug!(
            "Evaluated `{} {} {}` to {}",
            lhs.payload(),
            self.op,
            rhs.payload(),
            payload
        );

        let descriptor = if lhs.descriptor() == rhs.descriptor() {
            lhs.descriptor().clone()
        } else {
            Descriptor::Unspecified
        };
        Ok(Value::new(None, descriptor, payload))
    }
}

impl Introspect for Expression {
    fn dependencies(&self) -> &[Ident] {
        &self.dependencies
    }
}

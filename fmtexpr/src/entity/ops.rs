//! Operator sugar for entities.
//!
//! The `define_ops_entity!` macro implements the arithmetic and bitwise operator traits on the
//! given entity type, by value and by reference, so you can write `&a + &c` or `value * 2`.
use crate::entity::{BinaryOp, Entity, Expression, Primitive, Value, Variable};

macro_rules! define_ops_entity {
    ($name:ident: $($trait_:ident :: $method:ident => $op:ident),* $(,)?) => {
        $(
            impl<_R: Into<Entity>> std::ops::$trait_<_R> for $name {
                type Output = Expression;

                fn $method(self, rhs: _R) -> Self::Output {
                    Expression::new(BinaryOp::$op, self, rhs)
                }
            }

            impl<_R: Into<Entity>> std::ops::$trait_<_R> for &$name {
                type Output = Expression;

                fn $method(self, rhs: _R) -> Self::Output {
                    Expression::new(BinaryOp::$op, self, rhs)
                }
            }
        )*
    };
}

macro_rules! define_all_ops_entity {
    ($($name:ident),* $(,)?) => {
        $(
            define_ops_entity!(
                $name:
                Add::add => Add,
                Sub::sub => Sub,
                Mul::mul => Mul,
                Div::div => Div,
                Rem::rem => Rem,
                BitAnd::bitand => BitAnd,
                BitOr::bitor => BitOr,
                BitXor::bitxor => BitXor,
                Shl::shl => Shl,
                Shr::shr => Shr,
            );
        )*
    };
}

define_all_ops_entity!(Variable, Primitive, Value, Expression);

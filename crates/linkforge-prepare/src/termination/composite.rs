//! Composite OR termination.
//!
//! Uses macro-generated tuple implementations, so combining limits needs no
//! boxing.

use std::fmt::Debug;

use super::Termination;
use crate::scope::PrepareScope;

/// Terminates when ANY child terminates.
///
/// # Examples
///
/// ```
/// use linkforge_prepare::termination::{
///     DisjunctCountTermination, OrTermination, TimeTermination,
/// };
///
/// // Stop after 2 seconds OR 100000 disjuncts
/// let termination = OrTermination::new((
///     TimeTermination::seconds(2),
///     DisjunctCountTermination::new(100_000),
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &PrepareScope) -> bool {
                $((self.0).$idx.is_terminated(scope))||+
            }

            fn describe(&self) -> String {
                let parts: Vec<String> = vec![$((self.0).$idx.describe()),+];
                parts.join(" or ")
            }

            fn reason(&self, scope: &PrepareScope) -> Option<String> {
                None$(.or_else(|| (self.0).$idx.reason(scope)))+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);

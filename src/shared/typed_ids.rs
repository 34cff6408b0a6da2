use core::num::NonZeroUsize;
use crate::prelude::*;

/// Macro to implement typesafe ids.
macro_rules! impl_typed_id {
    ($name:ident, $string:expr) => {
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[doc = $string]
        pub struct $name(NonZeroUsize);
        impl $name {
            /// Converts the typed id into a usize.
            pub fn into_usize(self: Self) -> usize {
                self.into()
            }
        }
        impl From<$name> for usize {
            fn from(input: $name) -> usize {
                Into::<usize>::into(input.0) - 1
            }
        }
        impl TryFrom<usize> for $name {
            type Error = ();
            fn try_from(input: usize) -> Result<$name, ()> {
                input.checked_add(1).and_then(NonZeroUsize::new).map(Self).ok_or(())
            }
        }
        impl Debug for $name {
            fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), Into::<usize>::into(*self))
            }
        }
        impl Display for $name {
            fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", Into::<usize>::into(*self))
            }
        }
    };
}

impl_typed_id!(ProgramId, "Unique numeric id of a program loaded into a registry.");

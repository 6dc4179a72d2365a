//! Macros for declaring state enums.

/// Declare a fieldless enum usable as machine state keys.
///
/// Derives the traits [`State`](crate::core::State) needs, implements it with
/// the variant names, and adds an `ALL` constant listing the variants in
/// declaration order, ready to be passed as a machine's state names.
///
/// # Example
///
/// ```
/// use temperament::core::State;
/// use temperament::state_enum;
///
/// state_enum! {
///     pub enum Grunt {
///         Idle,
///         Seek,
///         Attack,
///         Flee,
///     }
/// }
///
/// assert_eq!(Grunt::Seek.name(), "Seek");
/// assert_eq!(Grunt::ALL.len(), 4);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            $vis const ALL: &'static [$name] = &[$(Self::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

//! Macros for declaring event and state enums.

/// Generate a field-less enum usable as an event or state.
///
/// Derives the traits [`Symbol`](crate::core::Symbol) needs, labels each
/// variant with its name, and adds an `ALL` constant listing the variants in
/// declaration order, ready to be used as a vocabulary.
///
/// # Example
///
/// ```
/// use fsm_table::symbol_enum;
/// use fsm_table::core::Symbol;
///
/// symbol_enum! {
///     pub enum Light {
///         Red,
///         Yellow,
///         Green,
///     }
/// }
///
/// assert_eq!(Light::ALL.len(), 3);
/// assert_eq!(Light::Yellow.label(), "Yellow");
/// ```
#[macro_export]
macro_rules! symbol_enum {
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
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];
        }

        impl $crate::core::Symbol for $name {
            fn label(&self) -> String {
                match self {
                    $(Self::$variant => stringify!($variant).to_string()),*
                }
            }
        }
    };
}

// component.rs - Component kinds as a closed tagged union
//
// A game declares all of its component payloads once with
// `define_components!`. The generated enum is the component type the world
// stores; the generated kind enum is the key of each storage bucket.

use std::fmt;
use std::hash::Hash;

/// A value that can live in a [`ComponentStore`](crate::ecs::ComponentStore).
///
/// Equality and hashing are structural: two components with the same kind
/// and field values are the same component.
pub trait Component: Clone + Eq + Hash + fmt::Debug + 'static {
    /// Discriminant used as the bucket key.
    type Kind: Copy + Eq + Hash + fmt::Debug + fmt::Display + 'static;

    fn kind(&self) -> Self::Kind;
}

/// A payload struct that is exactly one variant of the component enum `C`.
pub trait Variant<C: Component>: Into<C> + Sized {
    const KIND: C::Kind;

    /// Borrow the payload out of `component` if it is this variant.
    fn project(component: &C) -> Option<&Self>;
}

/// Declare the component enum and its kind enum.
///
/// Every payload type must appear once and implement
/// `Clone + Debug + PartialEq + Eq + Hash`.
///
/// # Example
/// ```ignore
/// #[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// pub struct Position { pub x: i32, pub y: i32 }
///
/// #[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// pub struct Player;
///
/// define_components! {
///     pub enum GameComponent: GameKind {
///         Position(Position),
///         Player(Player),
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_components {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:ident {
            $($variant:ident($payload:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant($payload)),+
        }

        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $kind {
            $($variant),+
        }

        impl $kind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [$kind] = &[$($kind::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($kind::$variant => stringify!($variant)),+
                }
            }
        }

        impl ::std::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl $crate::ecs::Component for $name {
            type Kind = $kind;

            fn kind(&self) -> $kind {
                match self {
                    $($name::$variant(_) => $kind::$variant),+
                }
            }
        }

        $(
            impl ::std::convert::From<$payload> for $name {
                fn from(value: $payload) -> Self {
                    $name::$variant(value)
                }
            }

            impl $crate::ecs::Variant<$name> for $payload {
                const KIND: $kind = $kind::$variant;

                #[allow(unreachable_patterns)]
                fn project(component: &$name) -> ::std::option::Option<&Self> {
                    match component {
                        $name::$variant(value) => ::std::option::Option::Some(value),
                        _ => ::std::option::Option::None,
                    }
                }
            }
        )+
    };
}

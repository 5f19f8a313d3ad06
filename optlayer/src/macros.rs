//! The `namespace!` declaration macro.

/// Declares a namespace struct and implements [`Namespace`](crate::Namespace)
/// for it.
///
/// Each field is written with its value type; the generated struct stores it
/// as `Option<T>` so that every field can be unset. The value type must
/// implement [`FieldValue`](crate::FieldValue): `String`, `i64`, `f64`,
/// `bool`, `Vec<Value>`, `BTreeMap<String, Value>` or [`Value`](crate::Value)
/// for an unconstrained field.
///
/// Attributes on the struct and on fields are passed through, so the same
/// declaration can derive `clap::Parser` and serve as the argument grammar.
/// `Default` is always derived.
///
/// # Examples
///
/// ```
/// use optlayer::{namespace, FieldType, Namespace};
///
/// namespace! {
///     #[derive(Debug, Clone, PartialEq, clap::Parser)]
///     pub struct Options {
///         #[arg(long)]
///         pub timeout: i64,
///         #[arg(long)]
///         pub name: String,
///     }
/// }
///
/// assert_eq!(Options::field_type("timeout"), Some(FieldType::Integer));
///
/// let options = <Options as clap::Parser>::parse_from(["app", "--timeout", "30"]);
/// assert_eq!(options.timeout, Some(30));
/// assert_eq!(options.name, None);
/// ```
#[macro_export]
macro_rules! namespace {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                // Must stay a bare `Option` for clap's derive to see an optional arg
                $field_vis $field: Option<$ty>,
            )*
        }

        impl $crate::Namespace for $name {
            const FIELDS: &'static [$crate::FieldSpec] = &[
                $(
                    $crate::FieldSpec {
                        name: ::std::stringify!($field),
                        ty: <$ty as $crate::FieldValue>::TYPE,
                    },
                )*
            ];

            fn store(&mut self, field: &str, value: $crate::Value) -> $crate::Result<()> {
                $(
                    if field == ::std::stringify!($field) {
                        return $crate::namespace::store_field(&mut self.$field, field, value);
                    }
                )*
                ::std::result::Result::Err($crate::Error::UnknownField {
                    field: ::std::string::ToString::to_string(field),
                })
            }

            fn get(&self, field: &str) -> ::std::option::Option<$crate::Value> {
                $(
                    if field == ::std::stringify!($field) {
                        return ::std::option::Option::Some(
                            self.$field
                                .as_ref()
                                .map_or($crate::Value::Null, $crate::FieldValue::to_value),
                        );
                    }
                )*
                ::std::option::Option::None
            }
        }
    };
}

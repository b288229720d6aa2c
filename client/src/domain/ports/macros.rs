//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message, a snake-case constructor that
//! accepts anything convertible into its field types, and an entry in the
//! generated `kind()` used as a stable label in log events.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident : $ty:ty),* }) => { Self::$variant { .. } };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Snake-case variant label for structured logs.
            pub fn kind(&self) -> &'static str {
                ::paste::paste! {
                    match self {
                        $(
                            define_port_error!(@pattern $variant $( { $($field : $ty),* } )?) =>
                                stringify!([<$variant:snake>]),
                        )*
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for the port error macro.
    define_port_error! {
        pub enum FetchPortError {
            Refused { message: String } => "refused: {message}",
            Throttled { backoff_secs: u64 } => "throttled for {backoff_secs}s",
            BadGateway { message: String, status: u16 } => "bad gateway ({status}): {message}",
            Closed => "connection closed",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = FetchPortError::refused("no route to host");
        assert_eq!(err.to_string(), "refused: no route to host");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = FetchPortError::throttled(30_u64);
        assert_eq!(err.to_string(), "throttled for 30s");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = FetchPortError::bad_gateway("upstream reset", 502_u16);
        assert_eq!(err.to_string(), "bad gateway (502): upstream reset");
    }

    #[test]
    fn kind_reports_snake_case_variant_names() {
        assert_eq!(FetchPortError::closed().kind(), "closed");
        assert_eq!(FetchPortError::bad_gateway("x", 502_u16).kind(), "bad_gateway");
    }
}

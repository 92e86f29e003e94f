//! `define_port_error!` builds port error enums with `thiserror` messages
//! and one snake_case constructor per variant.

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
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StorePortError {
            Offline => "store offline",
            Query { message: String } => "query failed: {message}",
            Rejected { status: u16 } => "rejected with status {status}",
            Mixed { message: String, status: u16 } => "{message} ({status})",
        }
    }

    #[test]
    fn unit_variants_get_snake_case_constructors() {
        assert_eq!(StorePortError::offline(), StorePortError::Offline);
        assert_eq!(StorePortError::offline().to_string(), "store offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = StorePortError::query("timeout");
        assert_eq!(err.to_string(), "query failed: timeout");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        assert_eq!(
            StorePortError::rejected(503_u16).to_string(),
            "rejected with status 503"
        );
        assert_eq!(StorePortError::mixed("busy", 429_u16).to_string(), "busy (429)");
    }
}

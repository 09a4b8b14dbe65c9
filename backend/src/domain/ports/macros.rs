//! Declarative helper for adapter error enums.
//!
//! Every port error in the gallery is a set of struct variants carrying
//! owned context (`message`, `id`). `define_port_error!` derives
//! `thiserror::Error` for the enum and emits one snake_case constructor per
//! variant whose arguments accept anything convertible into the field type,
//! so adapters can write `UserPersistenceError::not_found(id.as_ref())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = "Build [`" $name "::" $variant "`]."]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum AlbumStoreError {
            Offline { message: String } => "album store offline: {message}",
            Missing { album: String } => "album {album} missing",
            Throttled { album: String, retry_after: u32 } =>
                "album {album} throttled for {retry_after}s",
        }
    }

    #[rstest]
    #[case(AlbumStoreError::offline("pool drained"), "album store offline: pool drained")]
    #[case(AlbumStoreError::missing(String::from("alps")), "album alps missing")]
    #[case(AlbumStoreError::throttled("alps", 30_u32), "album alps throttled for 30s")]
    fn constructors_format_their_context(#[case] err: AlbumStoreError, #[case] rendered: &str) {
        assert_eq!(err.to_string(), rendered);
    }

    #[test]
    fn constructor_arguments_follow_declaration_order() {
        assert_eq!(
            AlbumStoreError::throttled("beach", 5_u32),
            AlbumStoreError::Throttled {
                album: "beach".to_owned(),
                retry_after: 5,
            }
        );
    }
}

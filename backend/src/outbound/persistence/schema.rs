//! Diesel table definitions for the user store.
//!
//! The tables are created outside this crate; the definitions here must match
//! the deployed schema.

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` and `email` each carry a unique index.
    users (id) {
        /// Primary key: opaque identifier, UUID v4 text for new accounts.
        id -> Text,
        username -> Text,
        email -> Text,
        /// Free-form biography; empty when unset.
        bio -> Text,
        /// Avatar image reference; empty when unset.
        image -> Text,
    }
}

diesel::table! {
    /// Directed follow edges; `user_id` follows `target_id`.
    follows (user_id, target_id) {
        user_id -> Text,
        target_id -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, follows);

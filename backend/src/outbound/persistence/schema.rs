//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! when a migration changes the table.

diesel::table! {
    /// Coffee catalogue entries.
    ///
    /// `name` carries the unique constraint `coffees_name_key`.
    coffees (id) {
        /// Serial primary key.
        id -> Int4,
        /// Unique display name.
        name -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Unit price.
        price -> Float8,
        /// Image URL.
        image -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

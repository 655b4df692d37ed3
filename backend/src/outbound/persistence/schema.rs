//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` is stored normalised and is unique.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        name -> Varchar,
        /// PHC-formatted Argon2 hash.
        password_hash -> Text,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
        date_joined -> Timestamptz,
    }
}

diesel::table! {
    /// One live bearer token per user, stored as a SHA-256 hex digest.
    auth_tokens (user_id) {
        user_id -> Uuid,
        digest -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ingredients, each owned by exactly one user.
    ingredients (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(auth_tokens -> users (user_id));
diesel::joinable!(ingredients -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(auth_tokens, ingredients, users);

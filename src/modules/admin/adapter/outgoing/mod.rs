mod supabase_jwt;

pub use supabase_jwt::{SupabaseJwtVerifier, SESSION_AUDIENCE};

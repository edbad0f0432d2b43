/// Primary keys of the `objects` table are PostgreSQL BIGSERIAL.
pub type DbId = i64;

pub(crate) mod homework;
pub(crate) mod practicum;
pub(crate) mod telegram_bot;

use time::OffsetDateTime;

pub(crate) fn unix_now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn unix_now_is_after_fixed_point() {
        let fixed = datetime!(2025-01-02 10:20:30 UTC).unix_timestamp();
        assert!(unix_now() > fixed);
    }
}

use chrono::{
  DateTime,
  Utc
};
use uuid::Uuid;

/// Time component (hex epoch milliseconds) followed by 48 random bits.
pub fn generate_id(
  now: DateTime<Utc>
) -> String {
  let random =
    Uuid::new_v4().simple().to_string();
  format!(
    "{:x}-{}",
    now.timestamp_millis().max(0),
    &random[..12]
  )
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use chrono::{
    TimeZone,
    Utc
  };

  use super::generate_id;

  #[test]
  fn ids_share_time_prefix_but_differ() {
    let now = Utc
      .with_ymd_and_hms(
        2026, 2, 16, 5, 0, 0
      )
      .unwrap();
    let prefix = format!(
      "{:x}-",
      now.timestamp_millis()
    );

    let ids: HashSet<String> = (0..500)
      .map(|_| generate_id(now))
      .collect();

    assert_eq!(ids.len(), 500);
    for id in &ids {
      assert!(id.starts_with(&prefix));
      assert_eq!(
        id.len(),
        prefix.len() + 12
      );
    }
  }
}

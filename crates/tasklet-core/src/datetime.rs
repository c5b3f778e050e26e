/// `createdAt` is stored as Unix epoch milliseconds. Older records
/// written with an RFC 3339 string are accepted on read.
pub mod epoch_millis_serde {
  use chrono::{
    DateTime,
    Utc
  };
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawTimestamp {
    Millis(i64),
    Fractional(f64),
    Text(String)
  }

  pub fn serialize<S>(
    dt: &DateTime<Utc>,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    serializer.serialize_i64(
      dt.timestamp_millis()
    )
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<DateTime<Utc>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw = RawTimestamp::deserialize(
      deserializer
    )?;
    match raw {
      | RawTimestamp::Millis(ms) => {
        from_millis(ms)
      }
      | RawTimestamp::Fractional(ms) => {
        from_millis(ms.trunc() as i64)
      }
      | RawTimestamp::Text(text) => {
        DateTime::parse_from_rfc3339(
          text.trim()
        )
        .map(|dt| {
          dt.with_timezone(&Utc)
        })
        .map_err(serde::de::Error::custom)
      }
    }
  }

  fn from_millis<E>(
    ms: i64
  ) -> Result<DateTime<Utc>, E>
  where
    E: serde::de::Error
  {
    DateTime::<Utc>::from_timestamp_millis(
      ms
    )
    .ok_or_else(|| {
      E::custom(format!(
        "timestamp out of range: {ms}"
      ))
    })
  }
}

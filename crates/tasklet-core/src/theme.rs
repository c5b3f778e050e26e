use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
)]
pub enum Theme {
  #[default]
  Light,
  Dark
}

impl Theme {
  pub fn toggle(self) -> Self {
    match self {
      | Self::Light => Self::Dark,
      | Self::Dark => Self::Light
    }
  }

  /// Literal written to the durable store and to the document root.
  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  /// Anything but the exact stored literals falls back to light.
  pub fn from_storage_value(
    value: Option<&str>
  ) -> Self {
    match value {
      | Some("dark") => Self::Dark,
      | _ => Self::Light
    }
  }

  pub fn toggle_label(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "Dark mode",
      | Self::Dark => "Light mode"
    }
  }
}

impl fmt::Display for Theme {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Theme {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "light" => Ok(Self::Light),
      | "dark" => Ok(Self::Dark),
      | other => Err(anyhow!(
        "unknown theme: {other} \
         (expected light or dark)"
      ))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::Theme;

  #[test]
  fn toggle_is_an_involution() {
    for theme in [Theme::Light, Theme::Dark]
    {
      assert_ne!(theme.toggle(), theme);
      assert_eq!(
        theme.toggle().toggle(),
        theme
      );
    }
  }

  #[test]
  fn storage_value_falls_back_to_light() {
    assert_eq!(
      Theme::from_storage_value(Some(
        "dark"
      )),
      Theme::Dark
    );
    assert_eq!(
      Theme::from_storage_value(Some(
        "light"
      )),
      Theme::Light
    );
    for junk in
      ["purple", "Dark", " dark", ""]
    {
      assert_eq!(
        Theme::from_storage_value(
          Some(junk)
        ),
        Theme::Light
      );
    }
    assert_eq!(
      Theme::from_storage_value(None),
      Theme::Light
    );
  }
}

use anyhow::anyhow;
use tasklet_core::{
  KeyValueStore,
  Theme
};

/// Attribute on `<html>` that carries the active theme.
pub const THEME_ATTRIBUTE: &str =
  "data-theme";

/// `window.localStorage`. Private browsing modes and disabled storage
/// surface as errors from every call.
#[derive(
  Debug, Clone, Copy, Default,
)]
pub struct LocalStorage;

impl LocalStorage {
  fn storage()
  -> anyhow::Result<web_sys::Storage> {
    web_sys::window()
      .ok_or_else(|| {
        anyhow!("no window object")
      })?
      .local_storage()
      .map_err(|err| {
        anyhow!(
          "localStorage access \
           denied: {err:?}"
        )
      })?
      .ok_or_else(|| {
        anyhow!(
          "localStorage unavailable"
        )
      })
  }
}

impl KeyValueStore for LocalStorage {
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Self::storage()?
      .get_item(key)
      .map_err(|err| {
        anyhow!(
          "reading {key} failed: \
           {err:?}"
        )
      })
  }

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    Self::storage()?
      .set_item(key, value)
      .map_err(|err| {
        anyhow!(
          "writing {key} failed: \
           {err:?}"
        )
      })
  }

  fn remove_item(
    &self,
    key: &str
  ) -> anyhow::Result<()> {
    Self::storage()?
      .remove_item(key)
      .map_err(|err| {
        anyhow!(
          "removing {key} failed: \
           {err:?}"
        )
      })
  }
}

/// Mirrors `theme` onto the document root. Safe to call repeatedly.
pub fn apply_root_theme(theme: Theme) {
  let Some(root) = web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document.document_element()
    })
  else {
    tracing::warn!(
      "no document root; theme not \
       applied"
    );
    return;
  };

  if let Err(err) = root.set_attribute(
    THEME_ATTRIBUTE,
    theme.as_str()
  ) {
    tracing::error!(
      error = ?err,
      "failed applying theme \
       attribute"
    );
  }
}

use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use tasklet_core::StorageKeys;
use tracing::{
  debug,
  info,
  trace,
  warn
};

const RC_ENV: &str = "TASKLETRC";
const RC_FILE_NAME: &str = ".taskletrc";
const DATA_DIR_NAME: &str = ".tasklet";

/// `key = value` settings from the rc file, with command line overrides
/// applied on top.
#[derive(Debug, Clone)]
pub struct Config {
  map: HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

/// One meaningful line of an rc file.
#[derive(Debug, PartialEq, Eq)]
enum RcLine<'a> {
  Include(&'a str),
  Setting {
    key:   &'a str,
    value: &'a str
  }
}

impl<'a> RcLine<'a> {
  /// `None` for blank and comment-only lines.
  fn parse(
    raw: &'a str
  ) -> Option<Result<Self, &'a str>> {
    let line = raw
      .split_once('#')
      .map_or(raw, |(before, _)| before)
      .trim();
    if line.is_empty() {
      return None;
    }
    if let Some(target) =
      line.strip_prefix("include ")
    {
      return Some(Ok(Self::Include(
        target.trim()
      )));
    }
    Some(
      line
        .split_once('=')
        .map(|(key, value)| {
          Self::Setting {
            key:   key.trim(),
            value: value.trim()
          }
        })
        .ok_or(line)
    )
  }
}

impl Config {
  pub fn defaults() -> Self {
    let map = [
      ("data.location", "~/.tasklet"),
      (
        "storage.prefix",
        tasklet_core::store::DEFAULT_KEY_PREFIX
      ),
      ("color", "on")
    ]
    .into_iter()
    .map(|(k, v)| {
      (k.to_string(), v.to_string())
    })
    .collect();

    Config {
      map,
      loaded_files: Vec::new()
    }
  }

  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Self::defaults();

    let Some(path) =
      resolve_rc_path(rc_override)
    else {
      debug!(
        "no rc file found; using \
         defaults"
      );
      return Ok(cfg);
    };

    info!(rc = %path.display(), "loading rc file");
    cfg.load_file(
      &expand_tilde(&path),
      &mut Vec::new()
    )?;
    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  /// Missing keys are `Ok(None)`; values that are not a recognised
  /// boolean are an error naming the key.
  pub fn get_bool(
    &self,
    key: &str
  ) -> anyhow::Result<Option<bool>> {
    self
      .map
      .get(key)
      .map(|v| {
        parse_bool(v).ok_or_else(|| {
          anyhow!(
            "invalid value for {key}: \
             {v}"
          )
        })
      })
      .transpose()
  }

  pub fn storage_keys(
    &self
  ) -> StorageKeys {
    StorageKeys::with_prefix(
      &self
        .get("storage.prefix")
        .unwrap_or_default()
    )
  }

  /// `chain` holds the canonical paths of the files currently being
  /// read, outermost first. An include that points back into it is
  /// skipped.
  #[tracing::instrument(skip(
    self, chain
  ))]
  fn load_file(
    &mut self,
    path: &Path,
    chain: &mut Vec<PathBuf>
  ) -> anyhow::Result<()> {
    let canonical =
      fs::canonicalize(path)
        .with_context(|| {
          format!(
            "failed to resolve {}",
            path.display()
          )
        })?;
    if chain.contains(&canonical) {
      warn!(
        file = %path.display(),
        depth = chain.len(),
        "rc include cycle; skipping"
      );
      return Ok(());
    }

    let text =
      fs::read_to_string(&canonical)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;
    self
      .loaded_files
      .push(path.to_path_buf());
    chain.push(canonical);

    let base_dir = path
      .parent()
      .unwrap_or(Path::new("."));
    for (index, raw) in
      text.lines().enumerate()
    {
      match RcLine::parse(raw) {
        | None => {}
        | Some(Ok(RcLine::Include(
          target
        ))) => {
          let target =
            resolve_include_path(
              base_dir, target
            )?;
          if target.exists() {
            self
              .load_file(&target, chain)?;
          } else {
            warn!(include = %target.display(), "include file does not exist; skipping");
          }
        }
        | Some(Ok(RcLine::Setting {
          key,
          value
        })) => {
          trace!(key, value, "loaded config key");
          self.map.insert(
            key.to_string(),
            value.to_string()
          );
        }
        | Some(Err(line)) => {
          return Err(anyhow!(
            "invalid config line \
             {}:{}: {line}",
            path.display(),
            index + 1
          ));
        }
      }
    }

    chain.pop();
    Ok(())
  }
}

#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = match (
    override_dir,
    cfg.get("data.location")
  ) {
    | (Some(path), _) => {
      path.to_path_buf()
    }
    | (None, Some(location)) => {
      expand_tilde(Path::new(&location))
    }
    | (None, None) => {
      dirs::home_dir()
        .map(|home| {
          home.join(DATA_DIR_NAME)
        })
        .ok_or_else(|| {
          anyhow!(
            "cannot determine home \
             directory"
          )
        })?
    }
  };

  if !dir.is_dir() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

/// `--rc-file`, then `$TASKLETRC` (`/dev/null` disables it), then
/// `~/.taskletrc` when present.
fn resolve_rc_path(
  override_path: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = override_path {
    return Some(path.to_path_buf());
  }

  if let Ok(from_env) =
    std::env::var(RC_ENV)
  {
    return (from_env != "/dev/null")
      .then(|| PathBuf::from(from_env));
  }

  dirs::home_dir()
    .map(|home| home.join(RC_FILE_NAME))
    .filter(|candidate| {
      candidate.exists()
    })
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let expanded =
    expand_tilde(Path::new(include));
  Ok(if expanded.is_absolute() {
    expanded
  } else {
    base_dir.join(expanded)
  })
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  match (
    path.strip_prefix("~"),
    dirs::home_dir()
  ) {
    | (Ok(rest), Some(home)) => {
      home.join(rest)
    }
    | _ => path.to_path_buf()
  }
}

fn parse_bool(
  value: &str
) -> Option<bool> {
  match value
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on"
    | "true" => Some(true),
    | "0" | "n" | "no" | "off"
    | "false" => Some(false),
    | _ => None
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::{
    Config,
    RcLine
  };

  #[test]
  fn reads_rc_file_with_includes() {
    let dir = tempdir().unwrap();
    let extra = dir.path().join("extra.rc");
    fs::write(
      &extra,
      "color = off\n"
    )
    .unwrap();
    let rc = dir.path().join("main.rc");
    fs::write(
      &rc,
      "# tasklet settings\n\
       storage.prefix = work # inline\n\
       include extra.rc\n\
       include missing.rc\n"
    )
    .unwrap();

    let cfg =
      Config::load(Some(&rc)).unwrap();
    assert_eq!(
      cfg.get("storage.prefix")
        .as_deref(),
      Some("work")
    );
    assert_eq!(
      cfg.get_bool("color").unwrap(),
      Some(false)
    );
    assert_eq!(
      cfg.storage_keys().tasks,
      "work.tasks"
    );
    assert_eq!(cfg.loaded_files.len(), 2);
  }

  #[test]
  fn mutual_includes_stop_at_the_cycle() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.rc");
    let b = dir.path().join("b.rc");
    fs::write(
      &a,
      "include b.rc\ncolor = off\n"
    )
    .unwrap();
    fs::write(
      &b,
      "include a.rc\n\
       storage.prefix = looped\n"
    )
    .unwrap();

    let cfg =
      Config::load(Some(&a)).unwrap();
    assert_eq!(cfg.loaded_files.len(), 2);
    assert_eq!(
      cfg.get("storage.prefix")
        .as_deref(),
      Some("looped")
    );
    assert_eq!(
      cfg.get_bool("color").unwrap(),
      Some(false)
    );
  }

  #[test]
  fn self_include_is_skipped() {
    let dir = tempdir().unwrap();
    let rc = dir.path().join("self.rc");
    fs::write(
      &rc,
      "include ./self.rc\ncolor = no\n"
    )
    .unwrap();

    let cfg =
      Config::load(Some(&rc)).unwrap();
    assert_eq!(cfg.loaded_files.len(), 1);
  }

  #[test]
  fn shared_include_is_read_from_each_parent()
  {
    let dir = tempdir().unwrap();
    fs::write(
      dir.path().join("common.rc"),
      "color = off\n"
    )
    .unwrap();
    fs::write(
      dir.path().join("left.rc"),
      "include common.rc\n"
    )
    .unwrap();
    let rc = dir.path().join("main.rc");
    fs::write(
      &rc,
      "include left.rc\n\
       include common.rc\n"
    )
    .unwrap();

    let cfg =
      Config::load(Some(&rc)).unwrap();
    assert_eq!(cfg.loaded_files.len(), 4);
  }

  #[test]
  fn overrides_win_over_file() {
    let mut cfg = Config::defaults();
    cfg.apply_overrides([
      (
        "rc.storage.prefix".to_string(),
        "home".to_string()
      ),
      (
        "color".to_string(),
        "no".to_string()
      )
    ]);

    assert_eq!(
      cfg.storage_keys().theme,
      "home.theme"
    );
    assert_eq!(
      cfg.get_bool("color").unwrap(),
      Some(false)
    );
  }

  #[test]
  fn booleans_are_strict() {
    let mut cfg = Config::defaults();
    assert_eq!(
      cfg.get_bool("color").unwrap(),
      Some(true)
    );
    assert_eq!(
      cfg.get_bool("missing").unwrap(),
      None
    );

    cfg.apply_overrides([(
      "color".to_string(),
      "Y".to_string()
    )]);
    assert_eq!(
      cfg.get_bool("color").unwrap(),
      Some(true)
    );

    cfg.apply_overrides([(
      "color".to_string(),
      "sometimes".to_string()
    )]);
    let err = cfg
      .get_bool("color")
      .unwrap_err();
    assert!(
      err.to_string().contains("color")
    );
  }

  #[test]
  fn rc_lines_parse() {
    assert_eq!(RcLine::parse("  # note"), None);
    assert_eq!(
      RcLine::parse(" a.b = c d # x"),
      Some(Ok(RcLine::Setting {
        key:   "a.b",
        value: "c d"
      }))
    );
    assert_eq!(
      RcLine::parse("include  x.rc"),
      Some(Ok(RcLine::Include("x.rc")))
    );
    assert_eq!(
      RcLine::parse("color on"),
      Some(Err("color on"))
    );
  }

  #[test]
  fn rejects_lines_without_equals() {
    let dir = tempdir().unwrap();
    let rc = dir.path().join("bad.rc");
    fs::write(&rc, "color on\n")
      .unwrap();

    let err = Config::load(Some(&rc))
      .unwrap_err();
    assert!(
      format!("{err:#}")
        .contains("invalid config line")
    );
  }
}

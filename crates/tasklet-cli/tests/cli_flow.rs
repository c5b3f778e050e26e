use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use tempfile::{TempDir, tempdir};

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("taskletrc"), "color = off\n").expect("write rc");
        Self { dir }
    }

    fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    fn run(&self, args: &[&str]) -> String {
        let rc = self.dir.path().join("taskletrc");
        let data = self.data_dir();
        let mut argv: Vec<OsString> = vec![
            "tasklet".into(),
            "--rc-file".into(),
            rc.into_os_string(),
            "--data".into(),
            data.into_os_string(),
        ];
        argv.extend(args.iter().map(OsString::from));

        let mut out = Vec::new();
        tasklet_cli::run_with_output(argv, &mut out).expect("command should succeed");
        String::from_utf8(out).expect("utf8 output")
    }

    fn record(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.data_dir().join(name)).ok()
    }
}

fn id_fragment(added: &str) -> String {
    added
        .split_whitespace()
        .nth(1)
        .expect("added line carries a short id")
        .to_string()
}

#[test]
fn add_list_toggle_clear() {
    let ws = Workspace::new();

    let added = ws.run(&["add", "Buy", "groceries"]);
    assert!(added.starts_with("Added "));
    assert!(added.contains("Buy groceries"));
    ws.run(&["add", "Call", "plumber"]);

    let list = ws.run(&["list"]);
    let plumber = list.find("Call plumber").expect("plumber listed");
    let groceries = list.find("Buy groceries").expect("groceries listed");
    assert!(plumber < groceries, "newest first:\n{list}");
    assert!(list.contains("2 items left, 0 completed"));

    let toggled = ws.run(&["toggle", &id_fragment(&added)]);
    assert!(toggled.starts_with("Completed "));

    let completed = ws.run(&["list", "--filter", "completed"]);
    assert!(completed.contains("[x]"));
    assert!(completed.contains("Buy groceries"));
    assert!(!completed.contains("Call plumber"));
    assert!(completed.contains("1 item left, 1 completed"));

    let cleared = ws.run(&["clear-completed"]);
    assert_eq!(cleared.trim(), "Cleared 1 completed task");

    let list = ws.run(&[]);
    assert!(!list.contains("Buy groceries"));
    assert!(list.contains("Call plumber"));
}

#[test]
fn blank_add_and_unknown_ids_are_harmless() {
    let ws = Workspace::new();

    assert_eq!(ws.run(&["add", "   "]).trim(), "nothing to add");
    assert_eq!(ws.record("tasklet.tasks.data"), None);

    assert_eq!(ws.run(&["toggle", "deadbeef"]).trim(), "no matching task");
    assert_eq!(ws.run(&["delete", "deadbeef"]).trim(), "no matching task");
    assert!(ws.run(&["list"]).starts_with("No tasks"));
}

#[test]
fn delete_removes_task() {
    let ws = Workspace::new();
    let added = ws.run(&["add", "Temporary"]);

    let deleted = ws.run(&["delete", &id_fragment(&added)]);
    assert!(deleted.starts_with("Deleted "));
    assert!(ws.run(&["list"]).starts_with("No tasks"));
    assert_eq!(ws.record("tasklet.tasks.data").as_deref(), Some("[]"));
}

#[test]
fn theme_persists_as_literal() {
    let ws = Workspace::new();

    assert_eq!(ws.run(&["theme"]).trim(), "theme: light");
    assert_eq!(ws.run(&["theme", "toggle"]).trim(), "theme: dark");
    assert_eq!(ws.record("tasklet.theme.data").as_deref(), Some("dark"));
    assert_eq!(ws.run(&["theme"]).trim(), "theme: dark");
    assert_eq!(ws.run(&["theme", "light"]).trim(), "theme: light");
}

#[test]
fn corrupt_records_fall_back_independently() {
    let ws = Workspace::new();
    ws.run(&["theme", "dark"]);
    fs::write(ws.data_dir().join("tasklet.tasks.data"), "{definitely not json").expect("corrupt tasks");

    assert!(ws.run(&["list"]).starts_with("No tasks"));
    assert_eq!(ws.run(&["theme"]).trim(), "theme: dark");

    fs::write(ws.data_dir().join("tasklet.theme.data"), "purple").expect("corrupt theme");
    assert_eq!(ws.run(&["theme"]).trim(), "theme: light");
}

#[test]
fn storage_prefix_override_changes_record_names() {
    let ws = Workspace::new();
    ws.run(&["rc.storage.prefix=work", "add", "Ship release"]);

    assert!(ws.record("work.tasks.data").is_some());
    assert_eq!(ws.record("tasklet.tasks.data"), None);
    assert!(ws.run(&["list"]).starts_with("No tasks"));
    assert!(ws.run(&["--rc", "storage.prefix=work", "list"]).contains("Ship release"));
}

#[test]
fn add_keeps_words_that_look_like_overrides() {
    let ws = Workspace::new();

    let added = ws.run(&["add", "Buy", "rc.local:fix"]);
    assert!(added.trim_end().ends_with("Buy rc.local:fix"), "{added}");
    assert!(ws.run(&["list"]).contains("Buy rc.local:fix"));
}

#[test]
fn data_dir_is_created() {
    let ws = Workspace::new();
    assert!(!ws.data_dir().exists());
    ws.run(&["list"]);
    assert!(ws.data_dir().is_dir());
}

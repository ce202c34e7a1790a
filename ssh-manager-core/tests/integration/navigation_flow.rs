//! End-to-end navigation tests
//!
//! Drive the navigator with the same event stream a user would produce and
//! check both the snapshots and what lands on disk.

use ssh_manager_core::config::ConfigPaths;
use ssh_manager_core::models::ConnectionProfile;
use ssh_manager_core::navigation::{ItemKind, ModeKind, ModeView, NavEvent, Navigator, Outcome};
use ssh_manager_core::{LaunchError, LaunchKind, RegistryService};
use tempfile::TempDir;

struct Harness {
    temp: TempDir,
    service: RegistryService,
    nav: Navigator,
}

impl Harness {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let service = RegistryService::open(&ConfigPaths::with_config_dir(temp.path())).unwrap();
        Self {
            temp,
            service,
            nav: Navigator::new(),
        }
    }

    fn send(&mut self, event: NavEvent) -> Outcome {
        self.nav.handle(&mut self.service, event)
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(NavEvent::AppendChar(c));
        }
    }

    fn select_label(&mut self, prefix: &str) {
        let snapshot = self.nav.snapshot(&self.service);
        let index = snapshot
            .items
            .iter()
            .position(|item| item.label.starts_with(prefix))
            .expect(&format!("no item starting with {prefix}"));
        for _ in 0..snapshot.items.len() {
            self.send(NavEvent::MoveUp);
        }
        for _ in 0..index {
            self.send(NavEvent::MoveDown);
        }
    }

    fn reopen(&self) -> RegistryService {
        RegistryService::open(&ConfigPaths::with_config_dir(self.temp.path())).unwrap()
    }
}

#[test]
fn create_edit_delete_profile_in_nested_group() {
    let mut h = Harness::new();

    // Create db1 in infra/db from the root.
    h.send(NavEvent::StartCreate);
    h.type_text("db1");
    h.send(NavEvent::MoveDown);
    h.type_text("10.0.0.5");
    h.send(NavEvent::MoveDown);
    h.type_text("2222");
    h.send(NavEvent::MoveDown);
    h.type_text("admin");
    h.send(NavEvent::MoveDown);
    h.send(NavEvent::MoveDown);
    h.send(NavEvent::MoveDown);
    h.type_text("infra/db");
    h.send(NavEvent::Submit);

    assert_eq!(h.nav.mode_kind(), ModeKind::Browse);
    assert_eq!(h.nav.message(), Some("Added connection: db1"));

    let snapshot = h.nav.snapshot(&h.service);
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].label, "infra (1)");

    // Walk down to it.
    h.send(NavEvent::Activate);
    h.select_label("db");
    h.send(NavEvent::Activate);
    assert_eq!(h.nav.path(), "infra/db");

    let snapshot = h.nav.snapshot(&h.service);
    assert_eq!(snapshot.items[0].kind, ItemKind::Up);
    assert_eq!(snapshot.items[1].label, "db1 (10.0.0.5)");

    // Edit the port.
    h.select_label("db1");
    h.send(NavEvent::StartEdit);
    h.send(NavEvent::MoveDown);
    h.send(NavEvent::MoveDown);
    for _ in 0..4 {
        h.send(NavEvent::Backspace);
    }
    h.type_text("2200");
    h.send(NavEvent::Submit);
    assert_eq!(h.nav.message(), Some("Updated connection: db1"));
    assert_eq!(h.reopen().find("db1").unwrap().port, 2200);

    // Delete it; the now-empty group disappears and we land at the root.
    h.select_label("db1");
    h.send(NavEvent::StartDelete);
    let ModeView::ConfirmDelete { name, host } = h.nav.snapshot(&h.service).mode else {
        panic!("expected confirmation view");
    };
    assert_eq!(name, "db1");
    assert_eq!(host.as_deref(), Some("10.0.0.5"));

    h.send(NavEvent::Confirm);
    assert_eq!(h.nav.path(), "");
    assert!(h.nav.snapshot(&h.service).items.is_empty());
    assert!(h.reopen().is_empty());
}

#[test]
fn invalid_port_leaves_registry_untouched() {
    let mut h = Harness::new();
    h.service
        .add_or_replace(ConnectionProfile::new("web", "example.com", "deploy"))
        .unwrap();

    h.send(NavEvent::StartEdit);
    h.send(NavEvent::MoveDown);
    h.send(NavEvent::MoveDown);
    h.send(NavEvent::Backspace);
    h.send(NavEvent::Backspace);
    h.type_text("abc");
    h.send(NavEvent::Submit);

    assert_eq!(h.nav.mode_kind(), ModeKind::Edit);
    assert_eq!(h.reopen().find("web").unwrap().port, 22);
}

#[test]
fn descend_then_up_returns_to_root() {
    let mut h = Harness::new();
    h.service
        .add_or_replace(ConnectionProfile::new("ab", "h", "u").with_group("a/b"))
        .unwrap();
    h.service
        .add_or_replace(ConnectionProfile::new("ac", "h", "u").with_group("a/c"))
        .unwrap();

    h.send(NavEvent::Activate);
    assert_eq!(h.nav.path(), "a");
    h.send(NavEvent::MoveDown);
    h.send(NavEvent::MoveDown);

    h.select_label("..");
    h.send(NavEvent::Activate);
    assert_eq!(h.nav.path(), "");
    assert_eq!(h.nav.selected(), 0);
}

#[test]
fn launch_round_trip_sets_message() {
    let mut h = Harness::new();
    h.service
        .add_or_replace(ConnectionProfile::new("web", "example.com", "deploy").with_password("pw"))
        .unwrap();

    let Outcome::Launch(request) = h.send(NavEvent::Connect) else {
        panic!("expected a launch request");
    };
    assert_eq!(request.kind, LaunchKind::Ssh);
    assert_eq!(h.nav.message(), Some("Connecting to example.com..."));

    h.nav.finish_launch(&request, Ok(0));
    assert_eq!(h.nav.message(), Some("Connection closed"));

    h.nav.finish_launch(&request, Ok(255));
    assert_eq!(h.nav.message(), Some("Connection failed with exit code 255"));

    h.nav.finish_launch(
        &request,
        Err(LaunchError::Spawn {
            program: "sshpass".to_string(),
            message: "not found".to_string(),
        }),
    );
    assert!(h.nav.message().unwrap().contains("sshpass"));
}

#[test]
fn unrecognized_events_do_not_change_state() {
    let mut h = Harness::new();
    h.service
        .add_or_replace(ConnectionProfile::new("web", "h", "u"))
        .unwrap();

    let before = h.nav.snapshot(&h.service);
    h.send(NavEvent::Confirm);
    h.send(NavEvent::AppendChar('x'));
    h.send(NavEvent::Submit);
    assert_eq!(h.nav.snapshot(&h.service), before);
}

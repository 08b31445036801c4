use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::Connection;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_stockroom"))
}

/// Isolated config/data homes plus a database path for one test.
struct Sandbox {
    base: PathBuf,
}

impl Sandbox {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        let base = std::env::temp_dir().join(format!(
            "stockroom_{}_{}_{}",
            prefix,
            std::process::id(),
            nanos
        ));
        std::fs::create_dir_all(base.join("config")).expect("create config dir");
        std::fs::create_dir_all(base.join("data")).expect("create data dir");
        Self { base }
    }

    fn db_path(&self) -> PathBuf {
        self.base.join("data").join("store.db")
    }

    fn config_path(&self) -> PathBuf {
        self.base.join("config").join("stockroom").join("config.toml")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(bin());
        cmd.args(args)
            .env("XDG_CONFIG_HOME", self.base.join("config"))
            .env("XDG_DATA_HOME", self.base.join("data"))
            .env("HOME", &self.base)
            .env("NO_COLOR", "1")
            .env_remove("STOCKROOM_DB")
            .env_remove("STOCKROOM_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("run stockroom")
    }

    fn init(&self) {
        let db = self.db_path();
        let output = self.run(&["init", db.to_str().expect("utf-8 path")]);
        assert!(output.status.success(), "init failed: {}", stderr(&output));
    }

    fn add_widget(&self, name: &str, price: &str, quantity: &str, supplier: &str) -> String {
        let output = self.run(&[
            "add",
            "--name",
            name,
            "--price",
            price,
            "--quantity",
            quantity,
            "--supplier-name",
            supplier,
            "--supplier-email",
            "orders@supplier.test",
            "--supplier-phone",
            "555-0100",
        ]);
        assert!(output.status.success(), "add failed: {}", stderr(&output));
        field(&stdout(&output), "id")
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.base);
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Value of a `key=value` line in plain output.
fn field(text: &str, key: &str) -> String {
    let prefix = format!("{}=", key);
    text.lines()
        .find_map(|line| line.strip_prefix(&prefix))
        .unwrap_or_else(|| panic!("missing {} in output:\n{}", key, text))
        .to_string()
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_init_writes_config_and_database() {
    let sandbox = Sandbox::new("init");
    sandbox.init();

    assert!(sandbox.db_path().exists());
    let config = std::fs::read_to_string(sandbox.config_path()).expect("config should exist");
    assert!(config.contains("[store]"));
    assert!(config.contains("store.db"));
    assert!(config.contains("com.example.stockroom"));

    // Running again leaves the existing config in place.
    let output = sandbox.run(&["init"]);
    assert!(output.status.success());
    assert_eq!(field(&stdout(&output), "config"), "unchanged");
}

#[test]
fn test_add_show_round_trip() {
    let sandbox = Sandbox::new("roundtrip");
    sandbox.init();

    let id = sandbox.add_widget("Widget", "9.99", "5", "Acme");

    let output = sandbox.run(&["show", &id, "--json"]);
    assert!(output.status.success(), "show failed: {}", stderr(&output));
    let item = json(&output);
    assert_eq!(item["name"], "Widget");
    assert_eq!(item["price"], "9.99");
    assert_eq!(item["quantity"], 5);
    assert_eq!(item["supplier_name"], "Acme");
    assert_eq!(
        item["uri"],
        format!("content://com.example.stockroom/inventory/{}", id)
    );

    let output = sandbox.run(&["show", &id]);
    let text = stdout(&output);
    assert_eq!(field(&text, "name"), "Widget");
    assert_eq!(field(&text, "supplier_phone"), "555-0100");
}

#[test]
fn test_quantity_defaults_to_zero() {
    let sandbox = Sandbox::new("defaultqty");
    sandbox.init();

    let output = sandbox.run(&[
        "add",
        "--name",
        "Gadget",
        "--price",
        "1.00",
        "--supplier-name",
        "X",
        "--supplier-email",
        "x@x.com",
        "--supplier-phone",
        "000",
    ]);
    assert!(output.status.success(), "add failed: {}", stderr(&output));
    let id = field(&stdout(&output), "id");

    let item = json(&sandbox.run(&["show", &id, "--json"]));
    assert_eq!(item["quantity"], 0);
}

#[test]
fn test_invalid_quantity_exits_with_invalid_input() {
    let sandbox = Sandbox::new("badqty");
    sandbox.init();

    let output = sandbox.run(&[
        "add",
        "--name",
        "Widget",
        "--price",
        "9.99",
        "--quantity=-1",
        "--supplier-name",
        "Acme",
        "--supplier-email",
        "a@acme.com",
        "--supplier-phone",
        "555",
    ]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("quantity"));

    let listed = json(&sandbox.run(&["list", "--json"]));
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
}

#[test]
fn test_show_missing_item_exits_not_found() {
    let sandbox = Sandbox::new("missing");
    sandbox.init();

    let output = sandbox.run(&["show", "404"]);
    assert_eq!(output.status.code(), Some(3));
    let err = stderr(&output);
    assert!(err.contains("Item 404 not found"));
    assert!(err.contains("stockroom list"));
}

#[test]
fn test_missing_config_exits_not_found() {
    let sandbox = Sandbox::new("noconfig");
    let output = sandbox.run(&["list"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("stockroom init"));
}

#[test]
fn test_db_flag_overrides_config() {
    let sandbox = Sandbox::new("dbflag");
    sandbox.init();
    sandbox.add_widget("Configured", "1.00", "1", "Acme");

    let other = sandbox.base.join("other.db");
    let output = sandbox.run(&["init", other.to_str().unwrap()]);
    assert!(output.status.success());

    let other_arg = other.to_str().unwrap();
    let listed = json(&sandbox.run(&["--db", other_arg, "list", "--json"]));
    assert_eq!(listed.as_array().map(Vec::len), Some(0));

    let listed = json(&sandbox.run(&["list", "--json"]));
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[test]
fn test_edit_changes_only_given_fields() {
    let sandbox = Sandbox::new("edit");
    sandbox.init();
    let id = sandbox.add_widget("Widget", "9.99", "5", "Acme");

    let output = sandbox.run(&["edit", &id, "--quantity", "2", "--price", "12.50"]);
    assert!(output.status.success(), "edit failed: {}", stderr(&output));

    let item = json(&sandbox.run(&["show", &id, "--json"]));
    assert_eq!(item["quantity"], 2);
    assert_eq!(item["price"], "12.50");
    assert_eq!(item["name"], "Widget");

    let output = sandbox.run(&["edit", &id]);
    assert_eq!(output.status.code(), Some(4));

    let output = sandbox.run(&["edit", "999", "--quantity", "1"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_image_attach_and_clear() {
    let sandbox = Sandbox::new("image");
    sandbox.init();

    let image = sandbox.base.join("photo.png");
    std::fs::write(&image, [0x89u8, b'P', b'N', b'G', 1, 2, 3]).expect("write image");
    let id = sandbox.add_widget("Camera", "199.00", "1", "Lens Co");

    let output = sandbox.run(&["edit", &id, "--image", image.to_str().unwrap()]);
    assert!(output.status.success(), "edit failed: {}", stderr(&output));
    let item = json(&sandbox.run(&["show", &id, "--json"]));
    assert_eq!(item["image_bytes"], 7);

    let output = sandbox.run(&["edit", &id, "--clear-image"]);
    assert!(output.status.success());
    let item = json(&sandbox.run(&["show", &id, "--json"]));
    assert!(item["image_bytes"].is_null());
}

#[test]
fn test_list_filters_and_sorts() {
    let sandbox = Sandbox::new("list");
    sandbox.init();
    sandbox.add_widget("Bolt", "0.25", "100", "Acme");
    sandbox.add_widget("Drill", "89.00", "2", "Tools Inc");
    sandbox.add_widget("Anvil", "120.00", "1", "Acme");

    let listed = json(&sandbox.run(&["list", "--supplier", "Acme", "--json"]));
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Bolt", "Anvil"]);

    let listed = json(&sandbox.run(&["list", "--sort", "price", "--desc", "--json"]));
    let prices: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["price"].as_str().unwrap())
        .collect();
    assert_eq!(prices, ["120.00", "89.00", "0.25"]);

    let listed = json(&sandbox.run(&["list", "--sort", "name", "--limit", "2", "--json"]));
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
    assert_eq!(listed[0]["name"], "Anvil");

    let output = sandbox.run(&["list", "--format", "plain"]);
    let first = stdout(&output).lines().next().unwrap_or_default().to_string();
    assert!(first.starts_with("1\tBolt\t0.25\t100"));

    let output = sandbox.run(&["list", "--json", "--format", "plain"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_delete_requires_confirmation_when_not_interactive() {
    let sandbox = Sandbox::new("delete");
    sandbox.init();
    let id = sandbox.add_widget("Widget", "9.99", "5", "Acme");

    let output = sandbox.run(&["delete", &id]);
    assert_eq!(output.status.code(), Some(4));
    assert!(sandbox.run(&["show", &id]).status.success());

    let output = sandbox.run(&["delete", &id, "--yes"]);
    assert!(output.status.success(), "delete failed: {}", stderr(&output));
    assert_eq!(field(&stdout(&output), "count"), "1");

    let output = sandbox.run(&["delete", &id, "--yes"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_delete_all() {
    let sandbox = Sandbox::new("deleteall");
    sandbox.init();
    for name in ["A", "B", "C"] {
        sandbox.add_widget(name, "1.00", "1", "Acme");
    }

    let output = sandbox.run(&["delete", "--all", "--yes"]);
    assert!(output.status.success());
    assert_eq!(field(&stdout(&output), "count"), "3");

    let output = sandbox.run(&["delete", "--all", "--yes"]);
    assert_eq!(field(&stdout(&output), "count"), "0");
}

#[test]
fn test_type_descriptors() {
    let sandbox = Sandbox::new("type");
    sandbox.init();

    let output = sandbox.run(&["type", "content://com.example.stockroom/inventory"]);
    assert_eq!(
        stdout(&output).trim(),
        "vnd.stockroom.cursor.dir/com.example.stockroom/inventory"
    );

    let output = sandbox.run(&["type", "content://com.example.stockroom/inventory/7"]);
    assert_eq!(
        stdout(&output).trim(),
        "vnd.stockroom.cursor.item/com.example.stockroom/inventory"
    );

    let output = sandbox.run(&["type", "content://com.example.stockroom/suppliers"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("Unknown URI"));
}

#[test]
fn test_custom_authority() {
    let sandbox = Sandbox::new("authority");
    let db = sandbox.db_path();
    let output = sandbox.run(&["init", db.to_str().unwrap(), "--authority", "shop.local"]);
    assert!(output.status.success());

    let output = sandbox.run(&[
        "add",
        "--name",
        "Widget",
        "--price",
        "9.99",
        "--supplier-name",
        "Acme",
        "--supplier-email",
        "a@acme.com",
        "--supplier-phone",
        "555",
    ]);
    assert!(field(&stdout(&output), "uri").starts_with("content://shop.local/inventory/"));
}

#[test]
fn test_check_reports_negative_quantity() {
    let sandbox = Sandbox::new("check");
    sandbox.init();
    let id = sandbox.add_widget("Widget", "9.99", "5", "Acme");

    let output = sandbox.run(&["check"]);
    assert!(output.status.success(), "check failed: {}", stderr(&output));
    assert_eq!(field(&stdout(&output), "status"), "ok");

    corrupt_quantity(&sandbox.db_path(), &id);
    let output = sandbox.run(&["check"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("negative quantity"));
}

fn corrupt_quantity(db: &Path, id: &str) {
    let conn = Connection::open(db).expect("open database");
    conn.execute(
        "UPDATE inventory SET quantity = -5 WHERE _id = ?1",
        [id.parse::<i64>().expect("numeric id")],
    )
    .expect("update should succeed");
}

#[test]
fn test_completions_generate() {
    let sandbox = Sandbox::new("completions");
    let output = sandbox.run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("stockroom"));
}

//! End-to-end runs of the terminal event loop
use std::fs;
use std::io::sink;
use std::time::Duration;

use tokio::io::{AsyncWriteExt, BufReader};

use sticky_todo::terminal::run_with;
use sticky_todo::{Config, LineStatuses, Settings, StateStore, StatusKey};

fn config_in(dir: &tempfile::TempDir) -> Config {
    Config::with_state_file(dir.path().join("data").join("todos.json"))
}

fn seed_state(config: &Config, text: &str, auto_save_sec: i64) {
    let settings = Settings {
        auto_save_sec,
        ..Settings::default()
    };
    StateStore::new(&config.state_file)
        .save(text, &LineStatuses::new(), &settings)
        .expect("seed state file");
}

/// Type `X` at the start of the note, wait `wait`, read the state file, then
/// signal shutdown. Returns the text saved mid-session and after exit.
async fn type_and_wait(config: &Config, wait: Duration) -> (String, String) {
    let (mut client, server) = tokio::io::duplex(256);
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let store = StateStore::new(&config.state_file);

    let driver = async {
        client.write_all(b"type X\n").await.expect("write commands");
        tokio::time::sleep(wait).await;
        let mid_session = store.load().text;
        tx.send(()).expect("signal shutdown");
        mid_session
    };
    let shutdown = async {
        let _ = rx.await;
    };

    let (result, mid_session) = tokio::join!(
        run_with(config, BufReader::new(server), sink(), shutdown),
        driver
    );
    result.expect("run loop");

    (mid_session, store.load().text)
}

#[tokio::test]
async fn test_end_of_input_saves_the_session() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = config_in(&dir);

    let script = "\
type buy milk
newline
type walk dog
red
goto 1
key ctrl+1
bg #000000
topmost
geometry 500x400+7+8
";
    run_with(&config, script.as_bytes(), sink(), std::future::pending())
        .await
        .expect("run loop");

    let saved = StateStore::new(&config.state_file).load();
    assert_eq!(saved.text, "buy milk\nwalk dog");
    assert_eq!(
        saved.line_status,
        [(1, StatusKey::Green), (2, StatusKey::Red)]
            .into_iter()
            .collect::<LineStatuses>()
    );
    assert_eq!(saved.settings.bg_color, "#000000");
    assert!(!saved.settings.topmost);
    assert_eq!(saved.settings.geometry().to_string(), "500x400+7+8");
}

#[tokio::test]
async fn test_quit_stops_reading() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = config_in(&dir);

    let script = "type kept\nquit\ntype ignored\n";
    run_with(&config, script.as_bytes(), sink(), std::future::pending())
        .await
        .expect("run loop");

    assert_eq!(StateStore::new(&config.state_file).load().text, "kept");
}

#[tokio::test]
async fn test_import_command_clears_statuses() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = config_in(&dir);
    let import = dir.path().join("list.txt");
    fs::write(&import, "fresh\nlist").unwrap();

    let script = format!(
        "type old task\nblue\nimport {}\nbogus command\n",
        import.display()
    );
    run_with(&config, script.as_bytes(), sink(), std::future::pending())
        .await
        .expect("run loop");

    let saved = StateStore::new(&config.state_file).load();
    assert_eq!(saved.text, "fresh\nlist");
    assert!(saved.line_status.is_empty());
}

#[tokio::test]
async fn test_shutdown_signal_saves_before_exit() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = config_in(&dir);

    let (mut client, server) = tokio::io::duplex(256);
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let driver = async move {
        client
            .write_all(b"type interrupted\nyellow\n")
            .await
            .expect("write commands");
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(()).expect("signal shutdown");
        // keep the input open so only the signal can end the loop
        client
    };
    let shutdown = async {
        let _ = rx.await;
    };

    let (result, _client) = tokio::join!(
        run_with(&config, BufReader::new(server), sink(), shutdown),
        driver
    );
    result.expect("run loop");

    let saved = StateStore::new(&config.state_file).load();
    assert_eq!(saved.text, "interrupted");
    assert_eq!(saved.line_status.get(&1), Some(&StatusKey::Yellow));
}

#[tokio::test(start_paused = true)]
async fn test_autosave_fires_while_the_loop_waits() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = config_in(&dir);
    seed_state(&config, "orig", 5);

    let (mid_session, after_exit) = type_and_wait(&config, Duration::from_secs(7)).await;

    assert_eq!(mid_session, "Xorig");
    assert_eq!(after_exit, "Xorig");
}

#[tokio::test(start_paused = true)]
async fn test_zero_interval_disables_autosave() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = config_in(&dir);
    seed_state(&config, "orig", 0);

    let (mid_session, after_exit) = type_and_wait(&config, Duration::from_secs(600)).await;

    assert_eq!(mid_session, "orig");
    assert_eq!(after_exit, "Xorig");
}

#[tokio::test]
async fn test_invalid_utf8_line_is_skipped() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = config_in(&dir);

    let script: &[u8] = b"type ok\n\xff\xfe bad\ntype !\n";
    run_with(&config, script, sink(), std::future::pending())
        .await
        .expect("run loop");

    assert_eq!(StateStore::new(&config.state_file).load().text, "ok!");
}

#[tokio::test]
async fn test_delete_without_positions_removes_the_selection() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = config_in(&dir);

    let script = "type buy oat milk\nselect 1:4 1:8\ndelete\ndelete\n";
    run_with(&config, script.as_bytes(), sink(), std::future::pending())
        .await
        .expect("run loop");

    assert_eq!(StateStore::new(&config.state_file).load().text, "buy milk");
}

//! Runs the compiled server over real pipes with requests that never reach the network.

use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::{Value, json};

#[test]
fn server_answers_each_line_and_exits_on_eof() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_stock_server"))
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    {
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(
                b"{not json\n\
                  {\"function\":\"get_stock_info\",\"arguments\":{}}\n\
                  \n\
                  {\"function\":\"bogus\"}\n",
            )
            .unwrap();
    }

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let lines: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["functions"].as_array().unwrap().len(), 3);
    assert_eq!(lines[1], json!({"error": "Invalid JSON"}));
    assert_eq!(lines[2], json!({"error": "Ticker symbol is required"}));
    assert_eq!(lines[3], json!({"error": "Unknown function: bogus"}));
}

use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_rotor-enigma");
const CONF: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/conf/enigma.conf");
const INPUT: &str = "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)\nHELLO WORLD\n";

fn scratch(name: &str) -> PathBuf {
	let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
	let _ = fs::remove_file(&path);
	path
}

fn run(args: &[&OsStr], stdin: &str) -> Output {
	let mut child = Command::new(BIN)
		.args(args)
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.unwrap();
	child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
	child.wait_with_output().unwrap()
}

#[test]
fn missing_config_exits_with_error() {
	let missing = scratch("no-such.conf");
	let out = run(&[missing.as_os_str()], "");
	assert_eq!(out.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&out.stderr).starts_with("Error:"));
	assert!(out.stdout.is_empty());
}

#[test]
fn enciphers_file_to_file() {
	let input = scratch("cli-file.in");
	let output = scratch("cli-file.out");
	fs::write(&input, INPUT).unwrap();

	let out = run(&[OsStr::new(CONF), input.as_os_str(), output.as_os_str()], "");
	assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
	assert_eq!(fs::read_to_string(&output).unwrap(), "VRJIL OZHPX\n");
}

#[test]
fn enciphers_stdin_to_stdout() {
	let out = run(&[OsStr::new(CONF)], INPUT);
	assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
	assert_eq!(String::from_utf8(out.stdout).unwrap(), "VRJIL OZHPX\n");
}

#[test]
fn bad_config_leaves_no_output_file() {
	let conf = scratch("cli-pawls.conf");
	let input = scratch("cli-pawls.in");
	let output = scratch("cli-pawls.out");
	fs::write(&conf, "ABC\n3 3\n").unwrap();
	fs::write(&input, INPUT).unwrap();

	let out = run(&[conf.as_os_str(), input.as_os_str(), output.as_os_str()], "");
	assert_eq!(out.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&out.stderr).starts_with("Error:"));
	assert!(!output.exists());
}

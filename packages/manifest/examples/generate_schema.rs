use schemars::schema_for;
use shell_manifest::ShellDescriptor;

fn main() {
    let schema = schema_for!(ShellDescriptor);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}

use super::{render, to_pascal_case};

const COMMAND: &str = r#"// Code generated by cligen;
use ::cligen_core::prelude::*;

#[derive(Default)]
pub struct {{type}} {
    general: General,
}

::cligen_core::submit!("{{group}}.{{subcommand}}", {{type}});

impl Command for {{type}} {
    fn register(&self, flags: FlagSet) -> FlagSet {
        self.general.register(flags)
    }

    fn description(&self) -> Option<&str> {
        None
    }

    fn process(&mut self, flags: &Flags) -> Result<(), Error> {
        self.general.load(flags);
        Ok(())
    }

    fn run(&mut self, _flags: &Flags) -> Result<Vec<u8>, Error> {
        Ok(Vec::new())
    }
}
"#;

const GROUP_INDEX: &str = "// Code generated by cligen;\n";

/// Source of a new command module, registered as `group.subcommand`.
pub fn command(group: &str, subcommand: &str) -> String {
    let type_name = type_name(subcommand);
    render(
        COMMAND,
        &[
            ("type", &type_name),
            ("group", group),
            ("subcommand", subcommand),
        ],
    )
}

/// Source of an empty group module (`<group>/mod.rs`).
pub fn group_index() -> String {
    GROUP_INDEX.to_string()
}

/// Name of the struct generated for `subcommand`. The suffix keeps it clear
/// of the prelude and the standard library (`error` -> `ErrorCmd`).
pub fn type_name(subcommand: &str) -> String {
    format!("{}Cmd", to_pascal_case(subcommand))
}

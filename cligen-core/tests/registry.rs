use cligen_core::prelude::*;

#[derive(Default)]
struct Linked;

impl Command for Linked {
    fn register(&self, flags: FlagSet) -> FlagSet {
        flags
    }

    fn process(&mut self, _flags: &Flags) -> Result<(), Error> {
        Ok(())
    }

    fn run(&mut self, _flags: &Flags) -> Result<Vec<u8>, Error> {
        Ok(b"linked\n".to_vec())
    }
}

#[derive(Default)]
struct Other;

impl Command for Other {
    fn register(&self, flags: FlagSet) -> FlagSet {
        flags
    }

    fn process(&mut self, _flags: &Flags) -> Result<(), Error> {
        Ok(())
    }

    fn run(&mut self, _flags: &Flags) -> Result<Vec<u8>, Error> {
        Ok(b"other\n".to_vec())
    }
}

cligen_core::submit!("linked.cmd", Linked);
cligen_core::submit!("other.cmd", Other);

#[test]
fn linked_registry_collects_submitted_commands() {
    let registry = Registry::linked();
    assert!(registry.contains("linked.cmd"));
    assert!(registry.contains("other.cmd"));
    assert_eq!(registry.names(), vec!["linked.cmd", "other.cmd"]);
}

#[test]
fn names_are_sorted() {
    let registry = Registry::new()
        .with("b.two", Other)
        .with("a.one", Linked)
        .with("c.three", Other);
    assert_eq!(registry.names(), vec!["a.one", "b.two", "c.three"]);
    assert_eq!(registry.len(), 3);
}

#[test]
fn last_registration_wins() {
    let mut registry = Registry::new();
    registry.register("dup.cmd", Linked).register("dup.cmd", Other);
    assert_eq!(registry.len(), 1);

    let cmd = registry.get_mut("dup.cmd").unwrap();
    let flags = cmd.register(FlagSet::new("dup.cmd")).parse(&[]).unwrap();
    assert_eq!(cmd.run(&flags).unwrap(), b"other\n");
}

#[test]
fn empty_registry() {
    let mut registry = Registry::new();
    assert!(registry.is_empty());
    assert!(registry.get_mut("missing").is_none());
}

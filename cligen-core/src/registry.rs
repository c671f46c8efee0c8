use std::collections::BTreeMap;

use linkme::distributed_slice;

use crate::command::Command;

/// Link-time list of self-registered commands.
///
/// Entries are added with [`submit!`](crate::submit) from any module linked
/// into the final binary and collected by [`Registry::linked`].
#[distributed_slice]
pub static COMMANDS: [Registration];

/// A command constructor placed into [`COMMANDS`].
pub struct Registration {
    pub name: &'static str,
    pub build: fn() -> Box<dyn Command>,
}

impl Registration {
    pub const fn of<C: Command + Default + 'static>(name: &'static str) -> Self {
        Registration {
            name,
            build: build::<C>,
        }
    }
}

fn build<C: Command + Default + 'static>() -> Box<dyn Command> {
    Box::new(C::default())
}

/// Register a command type under a dotted name at link time.
///
/// The type must implement [`Command`] and [`Default`].
///
/// ```ignore
/// cligen_core::submit!("origin.push", Push);
/// ```
#[macro_export]
macro_rules! submit {
    ($name:expr, $ty:ty) => {
        const _: () = {
            #[$crate::linkme::distributed_slice($crate::COMMANDS)]
            #[linkme(crate = $crate::linkme)]
            static REGISTRATION: $crate::Registration = $crate::Registration::of::<$ty>($name);
        };
    };
}

/// Name → command lookup table.
///
/// Built once by the entry point, then handed to the
/// [`Dispatcher`](crate::Dispatcher). Names are kept sorted.
#[derive(Default)]
pub struct Registry {
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every command registered with [`submit!`](crate::submit).
    pub fn linked() -> Self {
        let mut registry = Self::new();
        for registration in COMMANDS.iter() {
            registry.register_boxed(registration.name, (registration.build)());
        }
        registry
    }

    /// Builder form of [`register`](Registry::register).
    pub fn with<C: Command + 'static>(mut self, name: impl Into<String>, cmd: C) -> Self {
        self.register(name, cmd);
        self
    }

    /// Store `cmd` under `name`. A second registration under the same name
    /// replaces the first.
    pub fn register<C: Command + 'static>(&mut self, name: impl Into<String>, cmd: C) -> &mut Self {
        self.register_boxed(name, Box::new(cmd))
    }

    pub fn register_boxed(&mut self, name: impl Into<String>, cmd: Box<dyn Command>) -> &mut Self {
        let name = name.into();
        if self.commands.insert(name.clone(), cmd).is_some() {
            tracing::debug!(command = %name, "command registered twice, keeping the last one");
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Command + 'static)> {
        self.commands.get_mut(name).map(|cmd| cmd.as_mut())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

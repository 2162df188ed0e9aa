use log::warn;

use crate::script::error::ScriptError;
use crate::storage::backend::StorageBackend;
use crate::storage::config::ConfigFacade;
use crate::value::ScriptValue;

/// An object a script can call methods on by name.
pub trait ScriptObject {
    /// Type name reported to the runtime.
    fn type_name(&self) -> &'static str;

    /// Method names this object answers to.
    fn methods(&self) -> &'static [&'static str];

    /// Invoke `method`. `args` excludes the receiver; missing trailing
    /// arguments read as nil.
    fn call(&mut self, method: &str, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError>;
}

static NIL: ScriptValue = ScriptValue::Nil;

fn arg<'v>(args: &'v [ScriptValue], position: usize) -> &'v ScriptValue {
    args.get(position - 1).unwrap_or(&NIL)
}

fn path_arg(method: &str, args: &[ScriptValue], position: usize) -> Result<String, ScriptError> {
    arg(args, position)
        .to_text()
        .map_err(|e| ScriptError::bad_argument(method, position, e))
}

/// Script view of one storage object.
///
/// Storage failures on writes do not raise: `setDefaultValue` answers nil
/// and `setValue` answers false, and the failure is logged.
pub struct StorageBinding<'a> {
    handle: &'a mut dyn StorageBackend,
}

impl<'a> StorageBinding<'a> {
    pub const METHODS: &'static [&'static str] = &[
        "getType",
        "exists",
        "setDefaultValue",
        "setValue",
        "getValue",
        "clearValue",
        "save",
    ];

    pub fn new(handle: &'a mut dyn StorageBackend) -> Self {
        Self { handle }
    }
}

impl ScriptObject for StorageBinding<'_> {
    fn type_name(&self) -> &'static str {
        "StorageObject"
    }

    fn methods(&self) -> &'static [&'static str] {
        Self::METHODS
    }

    fn call(&mut self, method: &str, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
        match method {
            "getType" => Ok(ScriptValue::from(self.handle.kind().as_str())),
            "exists" => {
                let path = path_arg(method, args, 1)?;
                Ok(ScriptValue::Boolean(self.handle.exists(&path)))
            }
            "setDefaultValue" => {
                let path = path_arg(method, args, 1)?;
                match self.handle.set_default(&path, arg(args, 2)) {
                    Ok(written) => Ok(ScriptValue::Boolean(written)),
                    Err(e) => {
                        warn!("setDefaultValue('{}') failed: {}", path, e);
                        Ok(ScriptValue::Nil)
                    }
                }
            }
            "setValue" => {
                let path = path_arg(method, args, 1)?;
                match self.handle.set(&path, arg(args, 2)) {
                    Ok(()) => Ok(ScriptValue::Boolean(true)),
                    Err(e) => {
                        warn!("setValue('{}') failed: {}", path, e);
                        Ok(ScriptValue::Boolean(false))
                    }
                }
            }
            "getValue" => {
                let path = path_arg(method, args, 1)?;
                Ok(self.handle.get(&path))
            }
            "clearValue" => {
                let path = path_arg(method, args, 1)?;
                Ok(ScriptValue::Boolean(self.handle.clear(&path)))
            }
            "save" => {
                self.handle.save();
                Ok(ScriptValue::Nil)
            }
            other => Err(ScriptError::UnknownMethod {
                object: self.type_name(),
                method: other.to_string(),
            }),
        }
    }
}

/// Script view of the owner's configuration.
pub struct ConfigBinding<'a> {
    facade: &'a mut ConfigFacade,
}

impl<'a> ConfigBinding<'a> {
    pub const METHODS: &'static [&'static str] = &[
        "getValue",
        "setDefault",
        "set",
        "clear",
        "setAutosave",
        "save",
        "mapTableToKey",
    ];

    pub fn new(facade: &'a mut ConfigFacade) -> Self {
        Self { facade }
    }
}

impl ScriptObject for ConfigBinding<'_> {
    fn type_name(&self) -> &'static str {
        "Wrapper"
    }

    fn methods(&self) -> &'static [&'static str] {
        Self::METHODS
    }

    fn call(&mut self, method: &str, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
        match method {
            "getValue" => {
                let key = path_arg(method, args, 1)?;
                Ok(self.facade.get(&key))
            }
            "setDefault" => {
                let path = path_arg(method, args, 1)?;
                let written = self.facade.set_default(&path, arg(args, 2))?;
                Ok(ScriptValue::Boolean(written))
            }
            "set" => {
                let path = path_arg(method, args, 1)?;
                self.facade.set(&path, arg(args, 2))?;
                Ok(ScriptValue::Nil)
            }
            "clear" => {
                let path = path_arg(method, args, 1)?;
                self.facade.clear(&path);
                Ok(ScriptValue::Nil)
            }
            "setAutosave" => {
                let enabled = arg(args, 1)
                    .as_boolean()
                    .map_err(|e| ScriptError::bad_argument(method, 1, e))?;
                self.facade.set_autosave(enabled);
                Ok(ScriptValue::Nil)
            }
            "save" => {
                self.facade.save();
                Ok(ScriptValue::Nil)
            }
            "mapTableToKey" => {
                let path = path_arg(method, args, 1)?;
                let table = arg(args, 2)
                    .as_table()
                    .map_err(|e| ScriptError::bad_argument(method, 2, e))?;
                self.facade.map_table_to_key(&path, table)?;
                Ok(ScriptValue::Nil)
            }
            other => Err(ScriptError::UnknownMethod {
                object: self.type_name(),
                method: other.to_string(),
            }),
        }
    }
}

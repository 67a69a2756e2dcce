mod command;
mod monitor_runtime;

pub use command::{command_channel, MonitorCommand, MonitorCommandReceiver, MonitorCommandSender};
pub use monitor_runtime::MonitorRuntime;

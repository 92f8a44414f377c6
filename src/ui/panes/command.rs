//! Command window: output of host commands, rerun on every refill

use crate::host::Host;
use crate::inspect::format::escape_non_ascii;
use crate::ui::viewport::Viewport;
use crate::ui::window::Window;
use std::any::Any;

pub struct CommandWindow {
    title: String,
    commands: Vec<String>,
    viewport: Viewport,
}

impl CommandWindow {
    /// `commands` holds one command per line
    pub fn new(title: &str, commands: &str, mut viewport: Viewport) -> Self {
        viewport.region_mut().set_title(title);
        CommandWindow {
            title: title.to_string(),
            commands: commands.lines().map(str::to_string).collect(),
            viewport,
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl Window for CommandWindow {
    fn title(&self) -> &str {
        &self.title
    }

    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    fn refill(&mut self, host: &dyn Host) {
        if !self.viewport.is_valid() {
            return;
        }
        let mut lines = Vec::new();
        for command in &self.commands {
            match host.execute(command) {
                Ok(output) => {
                    lines.extend(output.split('\n').map(escape_non_ascii));
                    if lines.last().is_some_and(String::is_empty) {
                        lines.pop();
                    }
                }
                Err(e) => lines.push(e.to_string()),
            }
        }
        self.viewport.set_lines(lines);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InspectError;
    use crate::ui::region::PaneRegion;

    struct Shell;

    impl Host for Shell {
        fn execute(&self, command: &str) -> Result<String, InspectError> {
            match command {
                "info registers" => Ok("rax 0x1\nrbx 0x2\n".to_string()),
                "echo" => Ok("caf\u{e9}".to_string()),
                _ => Err(InspectError::UnknownCommand(command.to_string())),
            }
        }
    }

    #[test]
    fn test_outputs_concatenate_with_errors_inline() {
        let mut w = CommandWindow::new(
            "regs",
            "info registers\nbogus\necho",
            Viewport::attach(PaneRegion::new(40, 10)),
        );
        w.refill(&Shell);
        assert_eq!(
            w.viewport().lines(),
            [
                "rax 0x1",
                "rbx 0x2",
                "Undefined command: \"bogus\".",
                "caf\\351"
            ]
        );
        assert_eq!(w.viewport().region().title(), "regs");
    }
}

//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Dockyard Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[integration]
# enabled = true           # false runs the window manager without the shell dock
# call_timeout_ms = 2000   # 100-60000
# shell_name = "Workspace"  # dock name of the shell's own icon

[dock]
# slots = 16               # 1-64
# state_path = ""          # empty: <config dir>/dockyard/dock.toml
# launch_timeout_ms = 20000

[bounce]
# interval_ms = 3000       # 100-60000
# animations = true

[screen]
# width = 1920
# height = 1080
# icon_size = 64

[logging]
# level = "info"           # trace, debug, info, warn, error
"##
    .to_string()
}

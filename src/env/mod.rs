//! Detection and setup of the Python and Node.js prerequisites.

pub mod checks;
pub mod install;
pub mod instructions;
pub mod node;
pub mod python;

pub use checks::{check_node_environment, check_python_environment, EnvironmentReport, Issue};
pub use node::NodeLauncher;
pub use python::PythonEnv;

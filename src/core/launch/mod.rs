pub mod args;
pub mod classpath;
pub mod properties;
pub mod runtime;
pub mod task;

pub use args::ArgSources;
pub use classpath::build_classpath;
pub use properties::{HardwareAccelerationMode, PropertyInputs, RuntimeProperties};
pub use runtime::HostRuntime;
pub use task::{launch, LaunchPlan, LaunchStrategy, Launched};

extern crate serde;

use serde::{Deserialize, Serialize};

/// One input/output pair published on a problem page.
///
/// Field names are kept as `Input`/`Output` on disk so cache files stay
/// readable by older versions of the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sample {
    pub input: String,
    pub output: String,
}
impl Sample {
    pub fn new<I: Into<String>, O: Into<String>>(input: I, output: O) -> Self {
        Sample {
            input: input.into(),
            output: output.into(),
        }
    }
}

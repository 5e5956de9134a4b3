extern crate serde;
extern crate serde_yaml;

use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
}
impl Account {
    pub fn new(username: String, password: String) -> Self {
        Account { username, password }
    }
}

pub fn from_reader<R: Read>(rdr: R) -> Result<Account, serde_yaml::Error> {
    serde_yaml::from_reader(rdr)
}

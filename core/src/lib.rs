extern crate env_logger;
extern crate getrandom;
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
extern crate time;

pub mod actions;
pub mod data;
pub mod feed;
pub mod params;
pub mod persisted;
pub mod router;
pub mod seed;
pub mod store;
pub mod view;
pub mod view_state;

use std::io::Write;

// safe to call once per test as well as from the app shell
pub fn init_logger() {
    let _ = env_logger::builder()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .try_init();
}

/*!
 Command line tool that decodes an `NSKeyedArchiver` property list and emits the object graph
 it contains as indented JSON.
*/

use std::process::exit;

use crate::app::{
    options::{from_command_line, Options},
    runtime::Config,
};

mod app;
mod exporters;

fn main() {
    let arguments = from_command_line();
    match Options::from_args(&arguments) {
        Ok(options) => {
            if let Err(why) = Config::new(options).start() {
                eprintln!("Unable to unarchive: {why}");
                exit(1);
            }
        }
        Err(why) => {
            eprintln!("{why}");
            exit(1);
        }
    }
}

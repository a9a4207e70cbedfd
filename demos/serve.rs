use flagwork::prelude::*;
use flagwork::{
    BoolFlag, ConsoleInterface, DurationFlag, FlagSet, GenericFlag, StringSliceFlag, UintFlag,
};
use std::fmt::Display;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq)]
struct Level(String);

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Generic for Level {
    fn set(&mut self, input: &str) -> Result<(), String> {
        match input.to_lowercase().as_str() {
            "debug" | "info" | "warn" | "error" => {
                self.0 = input.to_lowercase();
                Ok(())
            }
            _ => Err(format!("unknown level: {input}")),
        }
    }
}

fn main() {
    let mut port: usize = 0;
    let mut verbose = false;
    let mut timeout = Duration::default();
    let mut hosts: Vec<String> = Vec::default();
    let mut level = Level::default();
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();

    {
        let flags: Vec<Box<dyn Flag<'_> + '_>> = vec![
            Box::new(
                UintFlag::new("port")
                    .alias("p")
                    .usage("Listen on `PORT`")
                    .value(8080)
                    .env("SERVE_PORT")
                    .destination(&mut port),
            ),
            Box::new(
                BoolFlag::new("verbose")
                    .alias("v")
                    .usage("Log every request")
                    .destination(&mut verbose),
            ),
            Box::new(
                DurationFlag::new("timeout")
                    .usage("Give up on a request after `DURATION`")
                    .value(Duration::from_secs(30))
                    .destination(&mut timeout),
            ),
            Box::new(
                StringSliceFlag::new("host")
                    .usage("Accept requests for `HOST`")
                    .env("SERVE_HOSTS")
                    .file("/etc/serve/hosts")
                    .destination(&mut hosts),
            ),
            Box::new(
                GenericFlag::<Level>::new("level")
                    .usage("The log `LEVEL`")
                    .value(Level("info".to_string()))
                    .destination(&mut level),
            ),
        ];
        let mut flag_set = FlagSet::new("serve");

        for flag in &flags {
            if let Err(error) = flag.apply(&mut flag_set) {
                eprintln!("{error}");
                std::process::exit(1);
            }
        }

        if let Err(error) = flag_set.parse(tokens.as_slice()) {
            eprintln!("{error}");
            println!("usage: serve [flags]");
            flag_set.print_defaults(&ConsoleInterface::default());
            std::process::exit(2);
        }
    }

    println!("Serving on port {port} for {hosts:?} (timeout: {timeout:?}, level: {level}, verbose: {verbose}).");
}

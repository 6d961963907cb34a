use rdv::{
    channel::channel,
    config::ExecutorConfig,
    defer::DeferStack,
    executor::Executor,
    lesson::{append_all, lookup, parse_int, sum_and_product},
    logger::{LoggerConfig, logger_init},
    select::Select,
    task::Increment,
    types::HashMap,
};
use rand::Rng;
use std::{process::ExitCode, thread};
use tracing::{error, info};

fn main() -> ExitCode {
    if let Err(err) = logger_init(&LoggerConfig::from_env()) {
        eprintln!("rdv-tour: {err}");
        return ExitCode::FAILURE;
    }
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "tour aborted");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    beyond_hello();
    learn_collections();
    learn_defer();
    learn_errors();
    learn_concurrency()?;
    Ok(())
}

fn beyond_hello() {
    let x = 3;
    let y = 4;
    let (sum, prod) = sum_and_product(x, y);
    println!("sum: {sum} prod: {prod}");
}

fn learn_collections() {
    let s = append_all(vec![1, 2, 3], &[4, 5, 6]);
    println!("{s:?}");
    let s = append_all(s, &[7, 8, 9]);
    println!("{s:?}");

    let mut m: HashMap<&str, i32> = [("three", 3), ("four", 4)].into_iter().collect();
    m.insert("one", 1);
    let mut entries: Vec<_> = m.iter().collect();
    entries.sort_unstable();
    println!("{entries:?}");

    let by_number: HashMap<i32, &str> = [(3, "three"), (4, "four")].into_iter().collect();
    match lookup(&by_number, &1) {
        Some(name) => println!("1 is {name}"),
        None => println!("1 is not in the map"),
    }
}

fn learn_defer() {
    let mut stack = DeferStack::new();
    stack.push(|| println!("deferred statements execute in reverse (LIFO) order."));
    stack.push(|| println!("This line is being printed first because"));
    info!(pending = stack.len(), "leaving scope with deferred actions");
}

fn learn_errors() {
    match parse_int("non-int") {
        Ok(value) => println!("parsed {value}"),
        Err(err) => println!("{err}"),
    }
}

fn learn_concurrency() -> Result<(), Box<dyn std::error::Error>> {
    let executor = Executor::setup(Increment, &ExecutorConfig::default())?;
    executor.execute_with([0, 10, -805], |value| println!("{value}"))?;

    let (tx_int, rx_int) = channel::<String>();
    let (tx_str, rx_str) = channel::<String>();
    let (tx_ch, rx_ch) = channel::<String>();
    let sender = thread::spawn(move || {
        let sent = match rand::thread_rng().gen_range(0..3) {
            0 => tx_int.send("42".to_string()),
            1 => tx_str.send("wordy".to_string()),
            _ => tx_ch.send("a channel of channels, in spirit".to_string()),
        };
        sent.is_ok()
    });

    let mut select = Select::new();
    let int_case = select.recv(&rx_int);
    let str_case = select.recv(&rx_str);
    select.recv(&rx_ch);
    let selected = select.select()?;
    match selected.index {
        i if i == int_case => println!("it's an int: {}", selected.value),
        i if i == str_case => println!("it's a string: {}", selected.value),
        _ => println!("it's ready: {}", selected.value),
    }
    if !sender.join().map_err(|_| "select sender panicked")? {
        return Err("select sender lost its value".into());
    }
    Ok(())
}

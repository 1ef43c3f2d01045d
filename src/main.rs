use std::env;
use std::process::ExitCode;

/// Initializes structured logging, filtered through `RUST_LOG`.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

fn main() -> ExitCode {
    init_tracing();

    let mut args = env::args().skip(1);
    let pattern = match args.next() {
        Some(pattern) => pattern,
        None => {
            eprintln!("Usage: refsm <pattern>");
            return ExitCode::FAILURE;
        }
    };

    let ast = match refsm::Ast::build(&pattern) {
        Ok(ast) => ast,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("Pattern: {pattern}");
    println!("AST: {ast}");

    let nfa = refsm::core::thompson::compile(&ast);
    println!(
        "\nNFA: states={} alphabet={:?}",
        nfa.state_count(),
        nfa.alphabet()
    );
    print!("{nfa}");

    let min = nfa.min();
    println!(
        "\nMinimal DFA: states={} alphabet={:?}",
        min.state_count(),
        min.alphabet()
    );
    print!("{min}");

    ExitCode::SUCCESS
}

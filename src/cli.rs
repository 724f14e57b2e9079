// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "todotxt v{} - keep a todo.txt list in order",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] [COMMAND] [ARGS]", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -f, --file <path>     Use this todo.txt instead of the configured one.");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -v, --verbose         Log debug output to stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS:");
    println!("    list                  Show entries (default). Completed ones are marked [x].");
    println!("    add <line>            Append a line, e.g. add \"(A) call mom\"");
    println!("    do <full line>        Check off the entry shown exactly as <full line>");
    println!("    done <text>           Check off every item whose text is <text>");
    println!("    rm <text>             Remove every item whose text is <text>");
    println!("    archive               Remove all completed items");
    println!("    sort                  Sort the file itself");
    println!("    edit                  Open the file with the configured editor");
    println!("    export                Print the items as JSON");
    println!("    path                  Print the resolved todo.txt path");
    println!();
    println!("LINE FORMAT:");
    println!("    [x ][(P) ]text        'x ' marks done, (A)-(Z) is the priority");
    println!();
    println!("ENVIRONMENT:");
    println!(
        "    {:<22}Todo file, overrides the config (not --file)",
        crate::config::TODO_FILE_ENV
    );
    println!();
    println!("MORE INFO:");
    println!("    License:    GPL-3.0");
}

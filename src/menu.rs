use std::io::{self, BufRead, Write};

use log::{error, info};

use crate::{report, store::Store};

const RULE_WIDTH: usize = 50;

fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "BOOKSTORE QUERY MENU")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "1. Run Author Revenue Query")?;
    writeln!(out, "2. Exit")?;
    writeln!(out, "{rule}")?;
    write!(out, "Enter your choice (1-2): ")?;
    out.flush()
}

/// Runs the interactive menu until `2` is chosen or `input` is exhausted.
pub fn run_menu<R, W>(store: &Store, mut input: R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write_menu(out)?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            info!("Input closed; leaving menu");
            return Ok(());
        }
        match line.trim() {
            "1" => {
                writeln!(out, "\nExecuting query...")?;
                match report::author_revenue(store) {
                    Ok(rows) => {
                        writeln!(out)?;
                        write!(out, "{}", report::render_report(&rows))?;
                    }
                    Err(err) => {
                        error!("Author revenue query failed: {err}");
                        writeln!(out, "Error executing query: {err}")?;
                    }
                }
            }
            "2" => {
                writeln!(
                    out,
                    "\nThank you for using the Bookstore Query System. Goodbye!"
                )?;
                return Ok(());
            }
            _ => writeln!(out, "\nInvalid choice. Please enter 1 or 2.")?,
        }
    }
}

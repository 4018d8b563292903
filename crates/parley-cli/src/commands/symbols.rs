//! Symbols command implementation.

use crate::output::Formatter;
use parley_domain::symbols::SymbolFamily;

/// Print the registry table and the structural markers.
pub fn execute_symbols(formatter: &Formatter) {
    println!("{}", formatter.symbols_table());
    let legend = parley_notation::legend();
    for line in legend.lines().skip(SymbolFamily::ALL.len()) {
        println!("{}", line);
    }
}

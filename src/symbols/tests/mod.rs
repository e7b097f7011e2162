mod tests_canonical;
mod tests_symbol_table;

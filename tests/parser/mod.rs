mod tests_ast;
mod tests_debug_tree;
mod tests_dialects;
mod tests_keywords_as_names;
mod tests_lexer;
mod tests_properties;
mod tests_recovery;
mod tests_rule_parser;

use regrep_automata::{nfa, parser_builder, Compiler, Determinizer};

const SIZE_LIMIT: usize = 10_000;

fn main() {
    println!("Regular expression automata - construction demo");
    println!("================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let default_patterns = [
        "a",
        "ab",
        "a|b",
        "a*b",
        "b|a|c*",
        "(a|b)*c",
        "(a|b)*c(d|e)",
        "a.",
        "(ab|.c)",
        "colou?r",
        "x{2,3}",
    ];
    let patterns: Vec<&str> = if args.is_empty() {
        default_patterns.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    for pattern in patterns {
        println!("\n=== Pattern: '{}' ===", pattern);

        let hir = match parser_builder().build().parse(pattern) {
            Ok(hir) => hir,
            Err(e) => {
                println!("Failed to parse pattern: {}", e);
                continue;
            }
        };

        let tree = match Compiler::new().size_limit(Some(SIZE_LIMIT)).compile(&hir) {
            Ok(tree) => tree,
            Err(e) => {
                println!("Failed to compile: {}", e);
                continue;
            }
        };
        println!("Tree: {:?}", tree);

        let nfa = match nfa::Builder::new().size_limit(Some(SIZE_LIMIT)).build(&tree) {
            Ok(nfa) => nfa,
            Err(e) => {
                println!("Failed to build NFA: {}", e);
                continue;
            }
        };
        println!("\nNFA ({} states):\n{}", nfa.state_count(), nfa);

        let dfa = match Determinizer::new().size_limit(Some(SIZE_LIMIT)).determinize(&nfa) {
            Ok(dfa) => dfa,
            Err(e) => {
                println!("Failed to determinize: {}", e);
                continue;
            }
        };
        println!("DFA ({} states):\n{}", dfa.state_count(), dfa);

        let minimized = dfa.minimize();
        println!("Minimized DFA ({} states):\n{}", minimized.state_count(), minimized);
    }
}

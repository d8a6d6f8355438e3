//! Property tests over random synthetic programs.

use chip8::isa::{encode, AluOp, Instruction, SkipCondition};
use chip8::render::Line;
use chip8::{render_subroutine, AnalysisConfig, DecompileError, Decompiler, RenderError};
use proptest::prelude::*;

const LOAD: u16 = 0x200;

fn config() -> AnalysisConfig {
    AnalysisConfig {
        max_explore_steps: 50_000,
        max_render_steps: 2_000,
        ..AnalysisConfig::default()
    }
}

/// An even address inside a program of `len` words, or just past it.
fn target(len: u16) -> impl Strategy<Value = u16> {
    (0..=len).prop_map(|i| LOAD + 2 * i)
}

fn condition() -> impl Strategy<Value = SkipCondition> {
    (0u8..16, 0u8..16, any::<u8>()).prop_flat_map(|(x, y, nn)| {
        prop_oneof![
            Just(SkipCondition::EqImm { x, nn }),
            Just(SkipCondition::NeImm { x, nn }),
            Just(SkipCondition::EqReg { x, y }),
            Just(SkipCondition::NeReg { x, y }),
            Just(SkipCondition::KeyDown { x }),
            Just(SkipCondition::KeyUp { x }),
        ]
    })
}

fn instruction(len: u16) -> impl Strategy<Value = Instruction> {
    prop_oneof![
        4 => (0u8..16, any::<u8>()).prop_map(|(x, nn)| Instruction::LoadImm { x, nn }),
        2 => (0u8..16, 0u8..16).prop_map(|(x, y)| Instruction::Alu { op: AluOp::Add, x, y }),
        1 => Just(Instruction::Clear),
        4 => condition().prop_map(Instruction::Skip),
        4 => target(len).prop_map(|addr| Instruction::Jump { addr }),
        2 => target(len).prop_map(|addr| Instruction::Call { addr }),
        2 => Just(Instruction::Return),
    ]
}

/// Programs that start with a call so the body runs as a subroutine.
fn program() -> impl Strategy<Value = Vec<u8>> {
    (4u16..40).prop_flat_map(|len| {
        prop::collection::vec(instruction(len), (len - 2) as usize).prop_map(move |body| {
            let mut words = vec![
                Instruction::Call { addr: LOAD + 4 },
                Instruction::Jump { addr: LOAD + 2 },
            ];
            words.extend(body);
            words.iter().flat_map(|i| encode(i).to_be_bytes()).collect()
        })
    })
}

/// Every `else:` closes exactly one open body at its own depth, and depth
/// grows by at most one level per line.
fn assert_balanced(lines: &[Line]) {
    let mut open: Vec<(usize, bool)> = Vec::new();
    let mut previous = 0;

    for line in lines {
        assert!(line.depth <= previous + 1, "depth jumped at {:?}", line);
        previous = line.depth;

        if line.text == "else:" {
            while matches!(open.last(), Some(&(depth, _)) if depth > line.depth) {
                open.pop();
            }
            let top = open.last_mut().expect("else without an open conditional");
            assert_eq!(top.0, line.depth);
            assert!(!top.1, "second else for one conditional");
            top.1 = true;
        } else {
            while matches!(open.last(), Some(&(depth, _)) if depth >= line.depth) {
                open.pop();
            }
            if line.text.starts_with("if ") {
                open.push((line.depth, false));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn analysis_terminates_with_typed_result(bytes in program()) {
        let decompiler = Decompiler::from_rom(&bytes, config()).unwrap();

        match decompiler.analyze() {
            Ok(analysis) => {
                let entries = &analysis.entry_points;
                let mut unique = entries.clone();
                unique.sort_unstable();
                unique.dedup();
                prop_assert_eq!(unique.len(), entries.len());

                for &entry in entries {
                    prop_assert!(analysis.symbols.is_instruction(entry));
                }
                prop_assert_eq!(decompiler.partition(&analysis).len(), bytes.len());
            }
            Err(DecompileError::Explore(_)) => {}
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn analysis_is_deterministic(bytes in program()) {
        let first = Decompiler::from_rom(&bytes, config()).unwrap();
        let second = Decompiler::from_rom(&bytes, config()).unwrap();

        let a = first.analyze();
        let b = second.analyze();
        prop_assert_eq!(&a, &b);

        if let (Ok(a), Ok(b)) = (a, b) {
            prop_assert_eq!(first.pseudocode(&a), second.pseudocode(&b));
            prop_assert_eq!(first.data_dump(&a), second.data_dump(&b));
        }
    }

    #[test]
    fn rendered_nesting_is_balanced(bytes in program()) {
        let decompiler = Decompiler::from_rom(&bytes, config()).unwrap();
        let Ok(analysis) = decompiler.analyze() else { return Ok(()) };

        let config = decompiler.config();
        let starts = std::iter::once(config.entry_point).chain(analysis.entry_points.iter().copied());

        // Main and every subroutine either render balanced or stop at the ceiling
        for start in starts {
            match render_subroutine(decompiler.image(), &analysis.symbols, start, config) {
                Ok(lines) => {
                    assert_balanced(&lines);
                    let elses = lines.iter().filter(|l| l.text == "else:").count();
                    let ifs = lines.iter().filter(|l| l.text.starts_with("if ")).count();
                    prop_assert!(elses <= ifs);
                }
                Err(err) => {
                    prop_assert_eq!(err, RenderError::IterationLimit { start, limit: config.max_render_steps });
                }
            }
        }
    }

    #[test]
    fn recursion_is_bounded(depth in 1usize..24) {
        // fun_204 calls itself before returning
        let bytes: Vec<u8> = [
            Instruction::Call { addr: 0x204 },
            Instruction::Jump { addr: 0x202 },
            Instruction::Call { addr: 0x204 },
            Instruction::Return,
        ]
        .iter()
        .flat_map(|i| encode(i).to_be_bytes())
        .collect();

        let config = AnalysisConfig { max_call_depth: depth, ..config() };
        let decompiler = Decompiler::from_rom(&bytes, config).unwrap();
        let err = decompiler.analyze().unwrap_err();
        prop_assert_eq!(
            err,
            DecompileError::Explore(chip8::ExploreError::StackOverflow { address: 0x204, depth })
        );
    }
}

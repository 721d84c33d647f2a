#![no_main]
use libfuzzer_sys::fuzz_target;
use optscan::{Arity, LongOption, OptionTable, Scanner};
use std::convert::TryInto;

const NAMES: &[&str] = &["a", "b", "c", "long", "flag", "opt", "x"];

// We check some basic invariants but mainly make sure that it
// doesn't panic or hang.
fuzz_target!(|data: &[u8]| {
    let mut data = data;
    let mut decisions;
    if data.len() > 8 {
        // Decide which method to call, 64 / 4 = 16 times
        decisions = u64::from_le_bytes(data[..8].try_into().unwrap());
        data = &data[8..];
    } else {
        decisions = 0;
    }
    let args: Vec<String> = data
        // Arguments can't contain null bytes (on Unix) so it's a
        // reasonable separator
        .split(|&x| x == b'\0')
        .map(|arg| String::from_utf8_lossy(arg).into_owned())
        .collect();
    let table = OptionTable::new(
        "a:b::c",
        &[
            LongOption::new("long", Arity::Required, 'L'),
            LongOption::new("flag", Arity::None, 'F'),
            LongOption::new("opt", Arity::Optional, 'O'),
        ],
    )
    .unwrap();
    let mut s = Scanner::new(table, args);
    loop {
        // 0 -> Scanner::next()
        // 1, 2, 3 -> Scanner::parse() with a name picked by the next bits
        match decisions % 4 {
            0 => match s.next() {
                Ok(Some(_)) => assert!(s.index() <= s.args().len() + 1),
                Ok(None) | Err(_) => break,
            },
            _ => {
                let before = s.cursor().clone();
                let name = NAMES[(decisions / 4 % NAMES.len() as u64) as usize];
                let _ = s.parse::<String>(name);
                assert_eq!(s.cursor(), &before);
            }
        }
        decisions /= 4;
        if decisions == 0 {
            while let Ok(Some(_)) = s.next() {}
            break;
        }
    }
    assert!(s.positionals().count() <= s.args().len());
    assert!(matches!(s.next(), Ok(None)));
    assert!(matches!(s.next(), Ok(None)));
    assert!(matches!(s.next(), Ok(None)));
});

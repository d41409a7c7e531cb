//! Output formatting helpers

/// Letters per block in chunked output
pub const BLOCK_WIDTH: usize = 5;

/// Blocks per line in wrapped output
pub const BLOCKS_PER_LINE: usize = 8;

/// Width of a section headline
pub const HEADLINE_WIDTH: usize = 47;

/// Separate `text` into blocks of `width` characters joined by single spaces
pub fn chunk(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|block| block.iter().collect::<String>())
        .collect::<Vec<String>>()
        .join(" ")
}

/// Group `text` into 5-letter blocks, 8 blocks per line
pub fn wrap(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(BLOCK_WIDTH * BLOCKS_PER_LINE)
        .map(|line| chunk(&line.iter().collect::<String>(), BLOCK_WIDTH))
        .collect::<Vec<String>>()
        .join("\n")
}

/// `===( title )====…` padded with `=` to [`HEADLINE_WIDTH`]
pub fn headline(title: &str) -> String {
    format!("===( {} )", title)
        .chars()
        .chain(std::iter::repeat('='))
        .take(HEADLINE_WIDTH.max(title.chars().count() + 7))
        .collect()
}

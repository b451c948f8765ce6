// Hardware drivers, chip-level and board-independent.
//
// Pin assignments and the enabled ADC pin come from board/.

pub mod adc;

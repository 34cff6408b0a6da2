
/// The `impl_opcodes` macro generates the opcode table and the VM instruction handlers from opcode definitions.
///
/// Each definition reads `fn NAME = value as "mnemonic" (self: &mut Self, operand: OperandKind) { code }`.
/// `code` runs on the program instance and evaluates to `Result<Flow, RuntimeErrorKind>`.
macro_rules! impl_opcodes {
    (
        $(
            $( #[ $attr:meta ] )*
            fn $opcode:ident = $value:literal as $mnemonic:literal
            ( $self:ident : & mut Self, $operand:ident : $kind:ident )
            $code:block
        )+
    ) => {

        /// VM opcodes. Generated from the handler definitions via the `impl_opcodes!` macro.
        #[allow(non_camel_case_types)]
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum OpCode {
            $(
                $( #[ $attr ] )*
                $opcode = $value,
            )+
        }

        impl OpCode {
            /// All opcodes in numeric order.
            pub const ALL: &'static [ OpCode ] = &[ $( OpCode::$opcode, )+ ];

            /// Converts u8 to an opcode, `None` for unknown values.
            pub fn from_u8(opcode: u8) -> Option<Self> {
                match opcode {
                    $( $value => Some(OpCode::$opcode), )+
                    _ => None,
                }
            }

            /// Returns the assembler mnemonic of the opcode.
            pub fn mnemonic(self: Self) -> &'static str {
                match self {
                    $( OpCode::$opcode => $mnemonic, )+
                }
            }

            /// Looks up an opcode by mnemonic (case-insensitive).
            pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
                $(
                    if mnemonic.eq_ignore_ascii_case($mnemonic) {
                        return Some(OpCode::$opcode);
                    }
                )+
                None
            }

            /// Returns the kind of operand the opcode expects.
            pub fn operand_kind(self: Self) -> crate::bytecode::OperandKind {
                match self {
                    $( OpCode::$opcode => crate::bytecode::OperandKind::$kind, )+
                }
            }
        }

        impl ::std::fmt::Display for OpCode {
            fn fmt(self: &Self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.mnemonic())
            }
        }

        /// Instruction handlers. Implemented on VMProgram by the `impl_opcodes!` macro.
        #[cfg(feature="runtime")]
        ::paste::paste! {
            impl crate::bytecode::runtime::vm::VMProgram {
                $(
                    $( #[ $attr ] )*
                    fn [<op_ $opcode:lower>] ( $self: &mut Self, $operand: &crate::bytecode::Operand )
                        -> Result<crate::bytecode::runtime::vm::Flow, crate::bytecode::runtime::error::RuntimeErrorKind>
                    $code
                )+

                /// Executes the given opcode with its operand.
                pub(crate) fn dispatch(self: &mut Self, opcode: OpCode, operand: &crate::bytecode::Operand)
                    -> Result<crate::bytecode::runtime::vm::Flow, crate::bytecode::runtime::error::RuntimeErrorKind>
                {
                    match opcode {
                        $( OpCode::$opcode => self.[<op_ $opcode:lower>](operand), )+
                    }
                }
            }
        }
    }
}

use crate::util::*;

#[test]
fn add_i32() {
    let result = run_i32("
        ldi 20
        put r1
        ldi 22
        addi
        halt
    ");
    assert_eq!(result[0], 42);
    assert_eq!(result[1], 20);
}

#[test]
fn sub_mul_with_register_operand() {
    let result = run_i32("
        ldi 6
        put r3
        ldi 10
        subi r3
        muli r3
        halt
    ");
    assert_eq!(result[0], 24);
}

#[test]
fn inc_neg_in_place() {
    let result = run_i32("
        ldi 5
        put r2
        inci r2
        inci r2
        negi r2
        ldi 1
        inci
        halt
    ");
    assert_eq!(result[2], -7);
    assert_eq!(result[0], 2);
}

#[test]
fn i32_wraps() {
    let result = run_i32("
        ldi 2147483647
        inci
        halt
    ");
    assert_eq!(result[0], i32::MIN);
}

#[test]
fn float_arithmetic() {
    let program = run("
        ldf 1.5
        put r1
        ldf 2.0
        mulf
        addf r1
        incf
        halt
    ");
    assert_eq!(program.register_f32(0).unwrap(), 5.5);
    assert_eq!(program.cond(), cond::POS);
}

#[test]
fn float_negation_and_subtraction() {
    let program = run("
        ldf 0.5
        put r1
        ldf 2.0
        subf r1
        negf
        halt
    ");
    assert_eq!(program.register_f32(0).unwrap(), -1.5);
    assert_eq!(program.cond(), cond::NEG);
}

#[test]
fn condition_flags() {
    assert_eq!(run("ldi 0\nhalt").cond(), cond::ZRO);
    assert_eq!(run("ldi -3\nhalt").cond(), cond::NEG);
    assert_eq!(run("ldi 3\nhalt").cond(), cond::POS);
}

#[test]
fn compare_sets_flags_only() {
    let program = run("
        ldi 3
        put r1
        ldi 7
        cmpi r1
        halt
    ");
    assert_eq!(program.cond(), cond::POS);
    assert_eq!(program.register_i32(0).unwrap(), 7);
    assert_eq!(run("ldi 3\nput r1\ncmpi\nhalt").cond(), cond::ZRO);
    assert_eq!(run("ldf 1.0\nput r1\nldf 0.5\ncmpf\nhalt").cond(), cond::NEG);
}

#[test]
fn condition_register_ops() {
    assert_eq!(run("ldi 0\nor pn\nhalt").cond(), cond::ALL);
    assert_eq!(run("ldi 0\nor pn\nand zn\nhalt").cond(), cond::ZRO | cond::NEG);
}

// tests/interactive_simulation.rs
// Drives debugging sessions the way an interactive client would

mod common;

use bytecode_debugger::debugger::StepMode;
use bytecode_debugger::{Intrinsic, Stop, StepRequest};
use common::*;

#[cfg(test)]
mod interactive_tests {
    use super::*;

    fn step(request: StepRequest) -> Stop {
        Stop::Step { request }
    }

    #[test]
    fn test_breakpoint_stops_before_line_runs() {
        let mut ctx = session(CALL_PROGRAM, CALL_SOURCE);
        assert!(ctx.set_breakpoints(&[2]));

        assert_eq!(ctx.run().unwrap(), Stop::Breakpoint { line: 2 });
        assert_eq!(ctx.current_line(), 2);
        // LIT 2 / STORE 0 i on line 2 have not run yet
        assert_eq!(value_of(&ctx, "i"), Some(0));
    }

    #[test]
    fn test_step_over_from_first_line() {
        let mut ctx = session(CALL_PROGRAM, CALL_SOURCE);
        ctx.set_breakpoints(&[1]);

        assert_eq!(ctx.run().unwrap(), Stop::Breakpoint { line: 1 });
        assert_eq!(ctx.current_line(), 1);
        assert_eq!(ctx.current_function_range(), Some((1, 5)));

        ctx.request_step(StepRequest::StepOver);
        assert_eq!(ctx.run().unwrap(), step(StepRequest::StepOver));
        assert_eq!(ctx.current_line(), 2);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_step_over_does_not_descend_into_call() {
        let mut ctx = session(CALL_PROGRAM, CALL_SOURCE);
        ctx.set_breakpoints(&[3]);
        ctx.run().unwrap();
        assert_eq!(ctx.current_line(), 3);

        ctx.request_step(StepRequest::StepOver);
        assert_eq!(ctx.run().unwrap(), step(StepRequest::StepOver));
        assert_eq!(ctx.current_line(), 4, "f's lines 10-12 must be skipped");
        assert_eq!(ctx.depth(), 0);
        assert_eq!(value_of(&ctx, "i"), Some(3), "the call still ran");
    }

    #[test]
    fn test_step_into_call_lands_in_callee() {
        let mut ctx = session(CALL_PROGRAM, CALL_SOURCE);
        ctx.set_breakpoints(&[3]);
        ctx.run().unwrap();

        ctx.request_step(StepRequest::StepInto);
        assert_eq!(ctx.run().unwrap(), step(StepRequest::StepInto));
        assert_eq!(ctx.current_line(), 10);
        assert_eq!(ctx.depth(), 1);

        // the callee's header line is not reported a second time
        ctx.request_step(StepRequest::StepOver);
        assert_eq!(ctx.run().unwrap(), step(StepRequest::StepOver));
        assert_eq!(ctx.current_line(), 11);
        assert_eq!(ctx.current_function(), "f");
        assert_eq!(ctx.current_function_range(), Some((10, 12)));
        assert_eq!(value_of(&ctx, "n"), Some(2));
    }

    #[test]
    fn test_step_into_without_call_stops_at_next_line() {
        let mut ctx = session(CALL_PROGRAM, CALL_SOURCE);
        ctx.set_breakpoints(&[1]);
        ctx.run().unwrap();

        ctx.request_step(StepRequest::StepInto);
        assert_eq!(ctx.run().unwrap(), step(StepRequest::StepInto));
        assert_eq!(ctx.current_line(), 2);

        ctx.request_step(StepRequest::StepInto);
        assert_eq!(ctx.run().unwrap(), step(StepRequest::StepInto));
        assert_eq!(ctx.current_line(), 3);
        assert_eq!(value_of(&ctx, "i"), Some(2));
    }

    #[test]
    fn test_step_out_returns_to_caller() {
        let mut ctx = session(CALL_PROGRAM, CALL_SOURCE);
        ctx.set_breakpoints(&[11]);
        ctx.run().unwrap();
        assert_eq!(ctx.depth(), 1);

        ctx.request_step(StepRequest::StepOut);
        assert_eq!(ctx.step_mode(), StepMode::Out { target: 0 });
        assert_eq!(ctx.run().unwrap(), step(StepRequest::StepOut));
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.current_line(), 3, "back on the calling line");
        assert_eq!(ctx.current_function_range(), Some((1, 5)));
    }

    #[test]
    fn test_step_out_waits_for_nested_call_to_unwind() {
        let mut ctx = session(NESTED_PROGRAM, NESTED_SOURCE);
        ctx.set_breakpoints(&[11]);
        assert_eq!(ctx.run().unwrap(), Stop::Breakpoint { line: 11 });
        assert_eq!(ctx.depth(), 1);

        // g's return brings depth back to 1 on the way, which is not the target
        ctx.request_step(StepRequest::StepOut);
        assert_eq!(ctx.run().unwrap(), step(StepRequest::StepOut));
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.current_function(), "main");
        assert_eq!(ctx.current_line(), 2);
        assert_eq!(ctx.current_function_range(), Some((1, 3)));
        assert_eq!(value_of(&ctx, "a"), Some(5), "result not stored yet");

        ctx.request_step(StepRequest::StepOver);
        assert_eq!(ctx.run().unwrap(), step(StepRequest::StepOver));
        assert_eq!(ctx.current_line(), 3);
        assert_eq!(value_of(&ctx, "a"), Some(6));
    }

    #[test]
    fn test_step_out_of_root_runs_to_breakpoint() {
        let mut ctx = session(CALL_PROGRAM, CALL_SOURCE);
        ctx.set_breakpoints(&[1, 4]);
        ctx.run().unwrap();

        ctx.request_step(StepRequest::StepOut);
        assert_eq!(ctx.step_mode(), StepMode::None);
        assert_eq!(ctx.run().unwrap(), Stop::Breakpoint { line: 4 });
    }

    #[test]
    fn test_breakpoint_cancels_pending_step() {
        let mut ctx = session(CALL_PROGRAM, CALL_SOURCE);
        ctx.set_breakpoints(&[3, 11]);
        ctx.run().unwrap();

        ctx.request_step(StepRequest::StepOver);
        assert_eq!(ctx.run().unwrap(), Stop::Breakpoint { line: 11 });
        assert_eq!(ctx.step_mode(), StepMode::None);
        assert_eq!(ctx.depth(), 1);
    }

    #[test]
    fn test_breakpoint_on_function_header_binds_parameters() {
        let mut ctx = session(CALL_PROGRAM, CALL_SOURCE);
        ctx.set_breakpoints(&[10]);

        assert_eq!(ctx.run().unwrap(), Stop::Breakpoint { line: 10 });
        assert_eq!(ctx.current_line(), 10);
        assert_eq!(ctx.current_function_range(), Some((10, 12)));
        let vars = ctx.snapshot();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name, "n");
        assert_eq!(vars[0].value, Some(2));
    }

    #[test]
    fn test_step_over_stops_when_loop_reenters_line() {
        let mut ctx = session(LOOP_PROGRAM, LOOP_SOURCE);
        ctx.set_breakpoints(&[3]);
        assert_eq!(ctx.run().unwrap(), Stop::Breakpoint { line: 3 });
        ctx.clear_breakpoints(&[3]);

        ctx.request_step(StepRequest::StepOver);
        assert_eq!(ctx.run().unwrap(), step(StepRequest::StepOver));
        assert_eq!(ctx.current_line(), 2);
        assert_eq!(value_of(&ctx, "i"), Some(1));

        ctx.request_step(StepRequest::StepOver);
        ctx.run().unwrap();
        assert_eq!(ctx.current_line(), 3);
    }

    #[test]
    fn test_step_into_write_intrinsic() {
        let mut ctx = session(CALL_PROGRAM, CALL_SOURCE);
        ctx.set_breakpoints(&[4]);
        ctx.run().unwrap();

        ctx.request_step(StepRequest::StepInto);
        assert_eq!(ctx.run().unwrap(), step(StepRequest::StepInto));
        assert_eq!(ctx.current_line(), 0, "intrinsics have no source line");

        ctx.request_step(StepRequest::StepInto);
        assert_eq!(
            ctx.run().unwrap(),
            Stop::Intrinsic {
                op: Intrinsic::Write
            }
        );
        assert!(ctx.is_intrinsic());
        assert_eq!(ctx.current_line(), 0);
        assert_eq!(ctx.current_function(), "Write");
        assert!(matches!(ctx.step_mode(), StepMode::In { .. }));
        assert_eq!(ctx.console().output, [3]);

        // the pending step-into finishes on the next line back in main
        assert_eq!(ctx.run().unwrap(), step(StepRequest::StepInto));
        assert!(!ctx.is_intrinsic());
        assert_eq!(ctx.current_line(), 5);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_step_into_read_intrinsic() {
        let mut ctx = session(READ_PROGRAM, READ_SOURCE);
        ctx.set_breakpoints(&[2]);
        assert_eq!(ctx.run().unwrap(), Stop::Breakpoint { line: 2 });

        // input can arrive while the program is stopped
        ctx.console_mut().input.push_back(41);

        ctx.request_step(StepRequest::StepInto);
        assert_eq!(
            ctx.run().unwrap(),
            Stop::Intrinsic {
                op: Intrinsic::Read
            }
        );

        ctx.request_step(StepRequest::Continue);
        assert_eq!(ctx.run().unwrap(), Stop::Halted);
        assert_eq!(ctx.console().output, [41]);
    }

    #[test]
    fn test_resume_from_parked_line_skips_its_breakpoint() {
        let mut ctx = session(CALL_PROGRAM, CALL_SOURCE);
        ctx.set_breakpoints(&[1]);
        ctx.run().unwrap();

        ctx.request_step(StepRequest::StepInto);
        ctx.run().unwrap();
        assert_eq!(ctx.current_line(), 2);

        // already reported as stopped on line 2
        ctx.set_breakpoints(&[2]);
        ctx.request_step(StepRequest::Continue);
        assert_eq!(ctx.run().unwrap(), Stop::Halted);
    }

    #[test]
    fn test_stop_on_entry_parks_at_first_line() {
        let mut ctx = session(CALL_PROGRAM, CALL_SOURCE);
        ctx.request_step(StepRequest::StepInto);

        assert_eq!(ctx.run().unwrap(), step(StepRequest::StepInto));
        assert_eq!(ctx.current_line(), 1);
        assert_eq!(ctx.current_function_range(), None);
    }
}

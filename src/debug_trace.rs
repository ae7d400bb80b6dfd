// NOTE: all the tracing is compiled out unless the `debug_trace` feature is enabled.
macro_rules! trace {
    ( @write $chunk:expr ) => {
        #[cfg(feature = "debug_trace")]
        {
            println!("-- Write: {:?}", $crate::base::Bytes::from($chunk));
        }
    };

    ( @end ) => {
        #[cfg(feature = "debug_trace")]
        println!("-- End");
    };

    ( @buffer $buffer:expr ) => {
        #[cfg(feature = "debug_trace")]
        {
            println!("-- Buffered: {:?}", $crate::base::Bytes::from($buffer.bytes()));
        }
    };

    ( @state $state:expr ) => {
        #[cfg(feature = "debug_trace")]
        println!("@state: {:?}", $state);
    };

    ( @event $event:expr $(, $arg:expr)* ) => {
        #[cfg(feature = "debug_trace")]
        {
            print!("@event: {}", $event);

            $(
                print!(" {:?}", $arg);
            )*

            println!();
        }
    };
}

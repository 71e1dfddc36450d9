//! Contract bindings used on the source chain.

#![allow(clippy::too_many_arguments)]

use alloy::sol;

sol! {
    /// Subset of ERC-20 needed to let the bridge pull tokens.
    #[sol(rpc)]
    interface IERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Omni Bridge entry point on EVM chains.
    #[sol(rpc)]
    interface IOmniBridge {
        /// Lock or burn `amount` of `tokenAddress` and emit a transfer for the relayer.
        /// `msg.value` must cover `nativeFee` (plus `amount` when bridging the native asset).
        function initTransfer(
            address tokenAddress,
            uint128 amount,
            uint128 fee,
            uint128 nativeFee,
            string recipient,
            string message
        ) external payable;

        event InitTransfer(
            address indexed sender,
            address indexed tokenAddress,
            uint64 indexed originNonce,
            uint128 amount,
            uint128 fee,
            uint128 nativeTokenFee,
            string recipient,
            string message
        );
    }
}

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IKuruRouter {
        function anyToAnySwap(
            address[] calldata marketAddresses,
            bool[] calldata isBuy,
            bool[] calldata nativeSend,
            address debitToken,
            address creditToken,
            uint256 amount,
            uint256 minAmountOut
        ) external payable returns (uint256 amountOut);

        function verifiedMarket(address market)
            external
            view
            returns (
                uint32 pricePrecision,
                uint96 sizePrecision,
                address baseAssetAddress,
                uint256 baseAssetDecimals,
                address quoteAssetAddress,
                uint256 quoteAssetDecimals,
                uint32 tickSize,
                uint96 minSize,
                uint96 maxSize,
                uint256 takerFeeBps,
                uint256 makerFeeBps
            );
    }

    #[sol(rpc)]
    interface IKuruPriceCalculator {
        /// Price over the route as a fixed-point value scaled by 10^18
        function calculatePriceOverRoute(address[] calldata route, bool[] calldata isBuy)
            external
            view
            returns (uint256);
    }
}
